use std::collections::BTreeMap;

use cmdloop::{Handler, Reply};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    value: String,
    is_true: bool,
}

/// An in-memory key/value map driven by `get` and `set`.
#[derive(Debug, Default)]
pub struct KvStore {
    entries: BTreeMap<String, Entry>,
}

impl KvStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Handler for KvStore {
    type Error = StoreError;

    fn get(&mut self, key: &str) -> Result<Reply, StoreError> {
        let entry =
            self.entries.get(key).ok_or_else(|| StoreError::KeyNotFound(key.to_owned()))?;
        let text = if entry.is_true { format!("{} (true)", entry.value) } else { entry.value.clone() };
        Ok(Reply::Text(text))
    }

    fn set(&mut self, key: &str, value: &str, is_true: bool) -> Result<Reply, StoreError> {
        let prev =
            self.entries.insert(key.to_owned(), Entry { value: value.to_owned(), is_true });
        tracing::debug!(key, replaced = prev.is_some(), "stored entry");
        Ok(Reply::Silent)
    }

    fn help(&mut self) -> Result<Reply, StoreError> {
        Ok(Reply::Text(cmdloop::render_help().trim_end().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdloop::{Command, LoopConfig, Repl, dispatch};

    #[test]
    fn set_then_get() {
        let mut store = KvStore::default();
        let set = Command::Set { key: "a".into(), value: "1".into(), is_true: false };
        assert_eq!(dispatch(&mut store, set), Ok(Reply::Silent));
        assert_eq!(
            dispatch(&mut store, Command::Get { key: "a".into() }),
            Ok(Reply::Text("1".into()))
        );

        let set = Command::Set { key: "a".into(), value: "2".into(), is_true: true };
        dispatch(&mut store, set).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            dispatch(&mut store, Command::Get { key: "a".into() }),
            Ok(Reply::Text("2 (true)".into()))
        );
    }

    #[test]
    fn missing_key() {
        let mut store = KvStore::default();
        assert_eq!(
            dispatch(&mut store, Command::Get { key: "nope".into() }),
            Err(StoreError::KeyNotFound("nope".into()))
        );
    }

    #[test]
    fn session() {
        let input = "set greeting 'hello world'\nget greeting\nget other\nset x\nhelp\n";
        let mut out = Vec::new();
        let config = LoopConfig::new("").with_help_on_error(false);
        let mut repl = Repl::new(config, KvStore::default());
        let stats = repl.run(input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let mut expect = String::from(
            "hello world\n\
             error: key not found: other\n\
             error: the argument '<VALUE>' is required but not provided (while parsing 'set')\n",
        );
        expect.push_str(&cmdloop::render_help());
        assert_eq!(out, expect);

        assert_eq!(stats.lines, 5);
        assert_eq!(stats.dispatched, 4);
        assert_eq!(stats.parse_errors, 1);
        assert_eq!(stats.handler_errors, 1);
        assert_eq!(repl.into_handler().len(), 1);
    }
}
