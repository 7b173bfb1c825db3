//! Route a parsed [`Command`] to the handler bound to its variant.
use crate::command::Command;

/// What the loop should do after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reply {
    /// Nothing to print.
    #[default]
    Silent,
    /// Print this text, followed by a newline.
    Text(String),
    /// Stop the loop, as if the input ended.
    Exit,
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Handlers of each command variant, supplied by the caller.
///
/// Exactly one method is called per dispatched command. Errors are returned
/// to the caller of [`dispatch`] untouched.
pub trait Handler {
    type Error;

    fn get(&mut self, key: &str) -> Result<Reply, Self::Error>;

    fn set(&mut self, key: &str, value: &str, is_true: bool) -> Result<Reply, Self::Error>;

    fn help(&mut self) -> Result<Reply, Self::Error>;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    type Error = H::Error;

    fn get(&mut self, key: &str) -> Result<Reply, Self::Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str, is_true: bool) -> Result<Reply, Self::Error> {
        (**self).set(key, value, is_true)
    }

    fn help(&mut self) -> Result<Reply, Self::Error> {
        (**self).help()
    }
}

/// Invoke the handler method matching `command`.
pub fn dispatch<H: Handler + ?Sized>(handler: &mut H, command: Command) -> Result<Reply, H::Error> {
    tracing::debug!(command = command.name(), "dispatching");
    match command {
        Command::Get { key } => handler.get(&key),
        Command::Set { key, value, is_true } => handler.set(&key, &value, is_true),
        Command::Help => handler.help(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_get: bool,
    }

    impl Handler for Recorder {
        type Error = String;

        fn get(&mut self, key: &str) -> Result<Reply, String> {
            self.calls.push(format!("get {key}"));
            if self.fail_get { Err(format!("no such key: {key}")) } else { Ok(Reply::Silent) }
        }

        fn set(&mut self, key: &str, value: &str, is_true: bool) -> Result<Reply, String> {
            self.calls.push(format!("set {key} {value} {is_true}"));
            Ok(Reply::Text("OK".into()))
        }

        fn help(&mut self) -> Result<Reply, String> {
            self.calls.push("help".into());
            Ok(Reply::Exit)
        }
    }

    #[test]
    fn one_call_per_command() {
        let mut h = Recorder::default();
        let set = Command::Set { key: "a".into(), value: "b".into(), is_true: true };
        assert_eq!(dispatch(&mut h, set), Ok(Reply::Text("OK".into())));
        assert_eq!(dispatch(&mut h, Command::Get { key: "a".into() }), Ok(Reply::Silent));
        assert_eq!(dispatch(&mut h, Command::Help), Ok(Reply::Exit));
        assert_eq!(h.calls, ["set a b true", "get a", "help"]);
    }

    #[test]
    fn handler_error_propagates() {
        let mut h = Recorder { fail_get: true, ..Recorder::default() };
        let ret = dispatch(&mut h, Command::Get { key: "x".into() });
        assert_eq!(ret, Err("no such key: x".to_owned()));
        assert_eq!(h.calls, ["get x"]);
    }

    #[test]
    fn through_reference() {
        let mut h = Recorder::default();
        let mut r = &mut h;
        dispatch(&mut r, Command::Help).unwrap();
        let dyn_h: &mut dyn Handler<Error = String> = &mut h;
        dispatch(dyn_h, Command::Get { key: "k".into() }).unwrap();
        assert_eq!(h.calls, ["help", "get k"]);
    }
}
