pub mod media_file_fs_repository;
pub mod record_mongo_repository;
