pub(super) mod global_file;
pub(super) mod workspace_file;
