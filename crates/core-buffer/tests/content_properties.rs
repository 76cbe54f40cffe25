//! Property tests comparing the segmented buffer against a plain vector
//! model under random in-bounds edit scripts.

use core_buffer::EditableBuffer;
use proptest::prelude::*;
use std::io::{Cursor, Read, Seek, SeekFrom};

#[derive(Debug, Clone)]
enum Edit {
    Insert(u64, u8),
    Replace(u64, u8),
    Delete(u64),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0u64..64, any::<u8>()).prop_map(|(at, b)| Edit::Insert(at, b)),
        (0u64..64, any::<u8>()).prop_map(|(at, b)| Edit::Replace(at, b)),
        (0u64..64).prop_map(Edit::Delete),
    ]
}

fn full_content(b: &mut EditableBuffer<Cursor<Vec<u8>>>) -> Vec<u8> {
    b.seek(SeekFrom::Start(0)).unwrap();
    let mut out = Vec::new();
    let mut chunk = [0u8; 32];
    loop {
        let n = b.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }
    out
}

proptest! {
    // Applying any in-bounds edit script, the buffer reads back exactly what
    // a plain vector would hold.
    #[test]
    fn matches_vector_model(source in proptest::collection::vec(any::<u8>(), 0..48),
                            script in proptest::collection::vec(edit_strategy(), 0..40)) {
        let mut model = source.clone();
        let mut b = EditableBuffer::new(Cursor::new(source)).unwrap();
        for edit in script {
            match edit {
                Edit::Insert(at, byte) => {
                    // clamp to an in-bounds insert (appending at the end included)
                    let at = at.min(model.len() as u64);
                    model.insert(at as usize, byte);
                    b.insert(at, byte);
                }
                Edit::Replace(at, byte) => {
                    if model.is_empty() { continue; }
                    let at = at.min(model.len() as u64 - 1);
                    model[at as usize] = byte;
                    b.replace(at, byte);
                }
                Edit::Delete(at) => {
                    if model.is_empty() { continue; }
                    let at = at.min(model.len() as u64 - 1);
                    model.remove(at as usize);
                    b.delete(at);
                }
            }
        }
        prop_assert_eq!(b.len(), model.len() as u64);
        prop_assert_eq!(full_content(&mut b), model);
    }

    // Edited intervals are always even-length, strictly increasing, and
    // non-touching, whatever the script does.
    #[test]
    fn edited_indices_well_formed(source in proptest::collection::vec(any::<u8>(), 0..48),
                                  script in proptest::collection::vec(edit_strategy(), 0..40)) {
        let len0 = source.len() as u64;
        let mut b = EditableBuffer::new(Cursor::new(source)).unwrap();
        let mut len = len0;
        for edit in script {
            match edit {
                Edit::Insert(at, byte) => {
                    b.insert(at.min(len), byte);
                    len += 1;
                }
                Edit::Replace(at, byte) => {
                    if len > 0 { b.replace(at.min(len - 1), byte); }
                }
                Edit::Delete(at) => {
                    if len > 0 { b.delete(at.min(len - 1)); len -= 1; }
                }
            }
        }
        let eis = b.edited_indices();
        prop_assert_eq!(eis.len() % 2, 0);
        prop_assert!(eis.windows(2).all(|w| w[0] < w[1]), "boundaries not increasing: {:?}", eis);
        // interval ends never touch the next interval's start
        prop_assert!(eis.chunks(2).zip(eis.chunks(2).skip(1)).all(|(a, b)| a[1] < b[0]));
    }

    // Reading after a seek returns exactly the modeled slice.
    #[test]
    fn seek_read_window(source in proptest::collection::vec(any::<u8>(), 1..48),
                        offset in 0u64..64, len in 1usize..32) {
        let model = source.clone();
        let mut b = EditableBuffer::new(Cursor::new(source)).unwrap();
        b.seek(SeekFrom::Start(offset)).unwrap();
        let mut p = vec![0u8; len];
        let n = b.read(&mut p).unwrap();
        let start = (offset as usize).min(model.len());
        let end = (start + len).min(model.len());
        prop_assert_eq!(&p[..n], &model[start..end]);
    }
}
