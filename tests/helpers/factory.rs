pub use super::factories::{
    ExistingStoreFactory, ImageFileFactory, RecordListFactory, StubEncoderFactory,
};

pub struct Factory;

impl Factory {
    pub fn record_list() -> RecordListFactory {
        RecordListFactory::new()
    }

    pub fn existing_store() -> ExistingStoreFactory {
        ExistingStoreFactory::new()
    }

    pub fn stub_encoder() -> StubEncoderFactory {
        StubEncoderFactory::new()
    }

    pub fn image_file() -> ImageFileFactory {
        ImageFileFactory::new()
    }
}
