use super::image_file_factory::ImageFileFactory;
use tempfile::tempdir;

#[test]
fn test_png_round_trips_its_pixels() {
    let dir = tempdir().unwrap();
    let factory = ImageFileFactory::new().with_size(2, 3);
    let path = factory.write_to(dir.path(), "g.png");

    let decoded = image::open(&path).unwrap().to_luma8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.into_raw(), factory.pixels());
}

#[test]
fn test_color_jpeg_has_three_channels() {
    let dir = tempdir().unwrap();
    let factory = ImageFileFactory::new().color().with_size(4, 4);
    assert_eq!(factory.pixels().len(), 48);

    let path = factory.write_to(dir.path(), "c.jpg");
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.color().channel_count(), 3);
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}
