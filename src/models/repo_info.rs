// ABOUTME: Repository summary shown above the status panel

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoInfo {
    pub working_path: String,
    pub remote_url: String,
    pub revision: String,
}
