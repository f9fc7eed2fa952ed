pub mod filename;
pub mod jwt;
pub mod multipart;
pub mod slug;
pub mod storage_path;
