pub mod existing_store_factory;
pub mod image_file_factory;
pub mod record_list_factory;
pub mod stub_encoder_factory;

pub use existing_store_factory::ExistingStoreFactory;
pub use image_file_factory::ImageFileFactory;
pub use record_list_factory::RecordListFactory;
pub use stub_encoder_factory::{StubEncoder, StubEncoderFactory};

#[cfg(test)]
mod image_file_factory_test;
#[cfg(test)]
mod record_list_factory_test;
