use std::{fs, io, path::PathBuf};

use observable_primer::{RxError, SingleValue};

/// Reads `path` as UTF-8 on every subscription.
pub fn load_text(path: impl Into<PathBuf>) -> SingleValue<String> {
    let path = path.into();
    SingleValue::create(move |emitter| {
        log::debug!("loading {}", path.display());
        match fs::read_to_string(&path) {
            Ok(contents) => {
                emitter.success(contents);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(RxError::not_found(path.display().to_string()))
            }
            Err(err) => Err(RxError::producer(err)),
        }
    })
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, env, fs, process, rc::Rc};

    use super::load_text;

    fn outcome(path: &std::path::Path) -> Vec<String> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        load_text(path).subscribe_by(
            move |text| a.borrow_mut().push(text),
            move |e| b.borrow_mut().push(e.as_label().to_string()),
        );
        let out = log.borrow().clone();
        out
    }

    #[test]
    fn reads_existing_file() {
        let path = env::temp_dir().join(format!("observable-tutorial-{}.txt", process::id()));
        fs::write(&path, "Copyright (c) 2020").unwrap();

        assert_eq!(outcome(&path), vec!["Copyright (c) 2020"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = env::temp_dir().join("observable-tutorial-definitely-missing.txt");
        assert_eq!(outcome(&path), vec!["resource_not_found"]);
    }
}
