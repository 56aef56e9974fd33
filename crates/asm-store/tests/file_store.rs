//! Store en disco: escritura concurrente por slots, fusión y relectura.

use asm_store::{index_path, FileStoreReader, FileStoreWriter, StoreReader, StoreWriter};

#[test]
fn concurrent_slots_merge_into_one_store() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("out");
    let writer = FileStoreWriter::create(&db, 4).unwrap();

    std::thread::scope(|s| {
        for slot in 0..4 {
            let writer = &writer;
            s.spawn(move || {
                for i in 0..25 {
                    let key = (i * 4 + slot).to_string();
                    writer.write(format!("payload {key}\n").as_bytes(), &key, slot).unwrap();
                }
            });
        }
    });
    writer.close().unwrap();

    // no quedan temporales de slot
    for slot in 0..4 {
        assert!(!tmp.path().join(format!("out.{slot}")).exists());
    }

    let reader = FileStoreReader::open(&db).unwrap();
    assert_eq!(reader.size(), 100);
    for i in 0..100 {
        let rec = reader.record(i).unwrap();
        assert_eq!(rec.key, i.to_string());
        assert_eq!(rec.payload, format!("payload {i}\n").as_bytes());
    }
    assert_eq!(reader.get_by_key("42").unwrap(), b"payload 42\n");
    assert!(reader.get_by_key("100").is_none());
}

#[test]
fn index_lengths_include_terminator() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("hdr");
    let writer = FileStoreWriter::create(&db, 1).unwrap();
    writer.write(b"HeaderA\n", "Q1", 0).unwrap();
    writer.write(b"HeaderB\n", "Q2", 0).unwrap();
    writer.close().unwrap();

    let index = std::fs::read_to_string(index_path(&db)).unwrap();
    assert_eq!(index, "Q1\t0\t9\nQ2\t9\t9\n");
    assert_eq!(std::fs::read(&db).unwrap(), b"HeaderA\n\0HeaderB\n\0");
}

#[test]
fn abort_discards_slot_files() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("out");
    let writer = FileStoreWriter::create(&db, 2).unwrap();
    writer.write(b"x", "1", 1).unwrap();
    writer.abort();
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn missing_index_fails_open() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("lonely");
    std::fs::write(&db, b"data\0").unwrap();
    assert!(matches!(FileStoreReader::open(&db), Err(asm_store::StoreError::Open { .. })));
}

#[test]
fn duplicate_key_leaves_nothing_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("out");
    let writer = FileStoreWriter::create(&db, 3).unwrap();
    writer.write(b"first", "7", 0).unwrap();
    writer.write(b"other", "8", 1).unwrap();
    writer.write(b"second", "7", 2).unwrap();

    let err = writer.close().unwrap_err();
    assert!(matches!(err, asm_store::StoreError::DuplicateKey(ref k) if k == "7"));
    // ni datos, ni índice, ni temporales de slot
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}
