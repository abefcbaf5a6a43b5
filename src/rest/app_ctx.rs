/// Shared by every request. Each request clones `repository` to get its own session.
#[derive(Debug, Clone)]
pub struct AppCtx<R, L> {
    pub repository: R,
    pub lookup: L,
}
