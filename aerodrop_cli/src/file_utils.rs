use std::path::{Path, PathBuf};

/// Every `.json` file under `folder_path`, recursively, sorted by path.
pub fn read_case_folder(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(read_case_folder(&path)?);
        } else if path.extension().is_some_and(|extension| extension == "json") {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_case_folder() {
        let current_dir = env::current_dir().unwrap();
        let folder_path = current_dir.join("tests/fixtures/cases");
        let files = read_case_folder(&folder_path).unwrap();

        assert_eq!(
            files,
            vec![
                current_dir.join("tests/fixtures/cases/morning.json"),
                current_dir.join("tests/fixtures/cases/nested/evening.json"),
            ]
        );
    }
}
