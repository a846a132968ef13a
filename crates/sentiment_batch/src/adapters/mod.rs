pub mod lexicon_resource;
pub mod object_store;
pub mod s3;
