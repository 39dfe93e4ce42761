use crate::areas::session::Session;
use std::io::Write;
use tokio::task::JoinSet;
use tracing::{info, warn};

impl Session {
    /// Decode, parse and hash-check every loose object
    ///
    /// Objects are checked in parallel on the blocking pool, each task holding
    /// its own reference to the repository handle.
    ///
    /// # Returns
    ///
    /// `true` when no object is corrupt
    pub async fn fsck(&self) -> anyhow::Result<bool> {
        let repository = self.model().current_handle()?;
        let mut checks = JoinSet::new();

        for oid in repository.objects() {
            let oid = oid?;
            let repository = repository.clone();

            checks.spawn_blocking(move || {
                let result = repository.database().check(&oid);
                (oid, result)
            });
        }

        let mut checked = 0usize;
        let mut problems = Vec::new();
        while let Some(joined) = checks.join_next().await {
            let (oid, result) = joined?;
            checked += 1;

            if let Err(e) = result {
                warn!(oid = %oid, error = %e, "corrupt object");
                problems.push((oid, e));
            }
        }
        problems.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (_, problem) in &problems {
            writeln!(self.writer(), "{problem}")?;
        }
        writeln!(
            self.writer(),
            "checked {checked} objects, {} corrupt",
            problems.len()
        )?;
        info!(checked, corrupt = problems.len(), "fsck finished");

        Ok(problems.is_empty())
    }
}
