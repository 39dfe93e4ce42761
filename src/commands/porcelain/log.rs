use crate::areas::session::Session;
use crate::artifacts::graph::ancestry::TraversalMode;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub mode: TraversalMode,
    pub oneline: bool,
}

impl Session {
    pub fn log(&self, address: &str, opts: &LogOptions) -> anyhow::Result<()> {
        let repository = self.model().current_handle()?;
        let start = repository.resolve(address)?;

        for (index, entry) in repository.ancestry(&start, opts.mode).enumerate() {
            let (oid, commit) = entry?;

            if opts.oneline {
                self.show_commit_oneline(&oid, &commit)?;
            } else {
                if index > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(&oid, &commit)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }
        if let Some(author) = commit.author() {
            writeln!(self.writer(), "Author: {}", author.display_name())?;
            writeln!(self.writer(), "Date:   {}", author.readable_timestamp())?;
        }
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
