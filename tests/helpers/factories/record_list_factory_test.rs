use super::record_list_factory::RecordListFactory;
use tempfile::tempdir;

#[test]
fn test_contents_one_line_per_entry() {
    let factory = RecordListFactory::new().with_entries(&[("a b.jpg", 3), ("c.jpg", -1)]);
    assert_eq!(factory.contents(), "a b.jpg 3\nc.jpg -1\n");
}

#[test]
fn test_generated_labels_cycle() {
    let records = RecordListFactory::new().with_generated(12).records();
    assert_eq!(records.len(), 12);
    assert_eq!(records[11].label, 1);
    assert_eq!(records[3].path, "img_00003.png");
}

#[test]
fn test_write_to_creates_file() {
    let dir = tempdir().unwrap();
    let path = RecordListFactory::new().write_to(dir.path(), "l.txt");
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "d.jpg 1\ne.jpg 0\n"
    );
}
