use camino::Utf8Path;

/// Collaborator that refreshes rule sources in place before compilation.
///
/// Remote bundle transports live outside this workspace; the driver only
/// needs the hook. Runs wired with no refresher skip the update with a log
/// line instead of failing.
pub trait SourceRefresher {
    /// Bring the sources under `policy` up to date.
    fn refresh(&self, policy: &Utf8Path) -> anyhow::Result<()>;
}
