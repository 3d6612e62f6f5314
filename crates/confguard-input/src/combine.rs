//! Merging multiple input files into one logical document for cross-file
//! evaluation.

use crate::split::split_documents;
use anyhow::Context;
use camino::Utf8PathBuf;

/// Concatenate the given files, in order, into one combined buffer.
///
/// Each file is read fully, trimmed of leading/trailing whitespace, and split
/// on its own detected separator; the sub-documents are re-concatenated with
/// the separators dropped, so rules see one merged document. Consecutive
/// files are joined with a single line feed and the final buffer is trimmed.
///
/// Any unreadable file aborts the whole operation with that file's error; no
/// partial result is returned.
pub fn combine_files(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<u8>> {
    let mut combined: Vec<u8> = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        let content =
            std::fs::read(path).with_context(|| format!("unable to open file {path}"))?;
        if index != 0 {
            combined.push(b'\n');
        }
        for part in split_documents(content.trim_ascii()) {
            combined.extend_from_slice(part);
        }
    }

    Ok(combined.trim_ascii().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use std::fs;

    fn write_files(dir: &tempfile::TempDir, files: &[(&str, &[u8])]) -> Vec<Utf8PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).expect("write fixture");
                Utf8Path::from_path(&path).expect("utf8 path").to_owned()
            })
            .collect()
    }

    #[test]
    fn joins_files_with_a_single_line_feed() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_files(
            &dir,
            &[("a.yaml", b"name: service\n"), ("b.yaml", b"weather: bad\n")],
        );
        let combined = combine_files(&paths).unwrap();
        assert_eq!(combined, b"name: service\nweather: bad");
    }

    #[test]
    fn trims_each_file_before_joining() {
        // The per-file trim must actually reach the joined buffer, not just
        // be computed.
        let dir = tempfile::tempdir().unwrap();
        let paths = write_files(
            &dir,
            &[("a.yaml", b"\n\nname: service\n\n\n"), ("b.yaml", b"  weather: bad\n")],
        );
        let combined = combine_files(&paths).unwrap();
        assert_eq!(combined, b"name: service\n  weather: bad");
    }

    #[test]
    fn drops_separators_within_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_files(&dir, &[("a.yaml", b"a: 1\n---\nb: 2\n")]);
        let combined = combine_files(&paths).unwrap();
        assert_eq!(combined, b"a: 1\nb: 2");
    }

    #[test]
    fn unreadable_file_aborts_with_no_partial_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = write_files(&dir, &[("a.yaml", b"a: 1\n")]);
        paths.push(Utf8Path::from_path(&dir.path().join("missing.yaml")).unwrap().to_owned());

        let err = combine_files(&paths).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn empty_input_list_combines_to_empty() {
        assert_eq!(combine_files(&[]).unwrap(), b"");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// A sub-document body that cannot fabricate or mask a separator at
        /// a file boundary.
        fn doc_body() -> impl Strategy<Value = String> {
            "[a-z]{1,8}: [a-z0-9]{1,8}".prop_map(|line| format!("{line}\n"))
        }

        fn file_content() -> impl Strategy<Value = (String, bool)> {
            (prop::collection::vec(doc_body(), 1..4), any::<bool>()).prop_map(
                |(docs, crlf)| {
                    let joined = docs.join("---\n");
                    if crlf {
                        (joined.replace('\n', "\r\n"), true)
                    } else {
                        (joined, false)
                    }
                },
            )
        }

        proptest! {
            /// Combining then reading back equals concatenating each file's
            /// individually-split sub-documents, whatever the per-file line
            /// endings were.
            #[test]
            fn combine_equals_concat_of_per_file_splits(
                files in prop::collection::vec(file_content(), 1..4)
            ) {
                let dir = tempfile::tempdir().unwrap();
                let mut paths = Vec::new();
                let mut expected: Vec<u8> = Vec::new();
                for (index, (content, _)) in files.iter().enumerate() {
                    let name = format!("f{index}.yaml");
                    let path = dir.path().join(&name);
                    fs::write(&path, content).unwrap();
                    paths.push(Utf8Path::from_path(&path).unwrap().to_owned());

                    if index != 0 {
                        expected.push(b'\n');
                    }
                    for part in split_documents(content.as_bytes().trim_ascii()) {
                        expected.extend_from_slice(part);
                    }
                }
                let expected = expected.trim_ascii().to_vec();

                prop_assert_eq!(combine_files(&paths).unwrap(), expected);
            }
        }
    }
}
