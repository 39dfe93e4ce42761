use anyhow::Result;
use bitview::areas::session::Session;
use bitview::artifacts::graph::ancestry::TraversalMode;
use bitview::commands::plumbing::cat_file::CatFileMode;
use bitview::commands::plumbing::list_objects::ListObjectsOptions;
use bitview::commands::porcelain::log::LogOptions;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "bitview",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Browse the objects stored in a git repository",
    long_about = "Reads a repository's loose object database and shows its blobs, \
    trees, commits and tags. Nothing is ever written to the repository.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "BITVIEW_REPO",
        help = "Repository to open (working tree or git directory); defaults to the current directory"
    )]
    repo: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "objects",
        about = "List every loose object",
        long_about = "This command walks the object database and prints the address of \
        every loose object, in directory order unless --sorted is given."
    )]
    Objects {
        #[arg(long, help = "Sort addresses")]
        sorted: bool,
        #[arg(short = 't', long = "with-type", help = "Print each object's type")]
        with_type: bool,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        long_about = "This command prints an object of the repository. \
        The address may be abbreviated to any unambiguous prefix of at least 4 characters.",
        group(ArgGroup::new("mode").required(true).args(["pretty", "object_type", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object's content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's type")]
        object_type: bool,
        #[arg(short = 's', help = "Print the object's size")]
        size: bool,
        #[arg(index = 1, help = "The object address")]
        address: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists a tree. A commit or tag address lists the tree it points to."
    )]
    LsTree {
        #[arg(short = 'r', help = "Recurse into sub-trees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree, commit or tag address")]
        address: String,
    },
    #[command(
        name = "log",
        about = "Show commit history",
        long_about = "This command walks the history of a commit, following first parents \
        unless --all-parents is given."
    )]
    Log {
        #[arg(long = "all-parents", help = "Follow every parent of merge commits")]
        all_parents: bool,
        #[arg(long, help = "One line per commit")]
        oneline: bool,
        #[arg(index = 1, help = "The commit to start from")]
        address: String,
    },
    #[command(
        name = "fsck",
        about = "Verify every loose object",
        long_about = "This command decodes, parses and hash-checks every loose object \
        and exits with a non-zero status if any is corrupt."
    )]
    Fsck,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bitview=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let session = Session::new(Box::new(std::io::stdout()));
    let repo = match cli.repo {
        Some(repo) => repo,
        None => std::env::current_dir()?,
    };
    session.model().open(&repo)?;

    match &cli.command {
        Commands::Objects { sorted, with_type } => session.list_objects(ListObjectsOptions {
            sorted: *sorted,
            with_type: *with_type,
        })?,
        Commands::CatFile {
            object_type,
            size,
            address,
            ..
        } => {
            let mode = if *object_type {
                CatFileMode::Type
            } else if *size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };
            session.cat_file(address, mode)?
        }
        Commands::LsTree { recursive, address } => session.ls_tree(address, *recursive)?,
        Commands::Log {
            all_parents,
            oneline,
            address,
        } => {
            let mode = if *all_parents {
                TraversalMode::AllParents
            } else {
                TraversalMode::FirstParent
            };
            session.log(
                address,
                &LogOptions {
                    mode,
                    oneline: *oneline,
                },
            )?
        }
        Commands::Fsck => {
            if !session.fsck().await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
