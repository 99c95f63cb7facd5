/// Emitted by the host once per page render, when stylesheets should be enqueued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnqueueAssets;
