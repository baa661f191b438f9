//! Call-frame environment for the PlayScript interpreter.

use std::collections::BTreeMap;

use play_types::ast::DeclId;

use crate::value::Value;

/// Bindings of one activation.
#[derive(Debug, Clone, Default)]
struct Frame {
    /// Function this frame activates; `None` for the global frame.
    function: Option<DeclId>,
    /// Frame of the lexically enclosing function's activation.
    parent: usize,
    bindings: BTreeMap<DeclId, Value>,
}

/// Stack of call frames keyed by declaration.
///
/// The bottom frame holds the program's top-level variables; each function
/// call pushes one frame for its parameters and locals. Lookups follow the
/// static chain: the current frame, then the frame of the enclosing
/// function's most recent activation, and so on down to the global frame.
/// A callee never sees its caller's bindings.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment with one global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Push a frame for a call to `function`, declared inside `enclosing`
    /// (`None` at top level).
    pub fn push_frame(&mut self, function: DeclId, enclosing: Option<DeclId>) {
        let parent = self
            .frames
            .iter()
            .rposition(|frame| frame.function == enclosing)
            .unwrap_or(0);
        self.frames.push(Frame {
            function: Some(function),
            parent,
            bindings: BTreeMap::new(),
        });
    }

    /// Pop the innermost frame. The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of frames, including the global frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind a declaration in the current (innermost) frame.
    pub fn define(&mut self, decl: DeclId, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(decl, value);
        }
    }

    /// Look up a binding along the static chain.
    pub fn get(&self, decl: DeclId) -> Option<&Value> {
        let index = self.find(decl)?;
        self.frames[index].bindings.get(&decl)
    }

    /// Store into the frame on the static chain that already binds `decl`,
    /// otherwise into the current frame.
    pub fn assign(&mut self, decl: DeclId, value: Value) {
        match self.find(decl) {
            Some(index) => {
                self.frames[index].bindings.insert(decl, value);
            }
            None => self.define(decl, value),
        }
    }

    /// Index of the frame binding `decl`, searching the static chain.
    fn find(&self, decl: DeclId) -> Option<usize> {
        let mut index = self.frames.len().checked_sub(1)?;
        loop {
            let frame = &self.frames[index];
            if frame.bindings.contains_key(&decl) {
                return Some(index);
            }
            if index == 0 {
                return None;
            }
            index = frame.parent;
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: DeclId = DeclId(10);
    const G: DeclId = DeclId(11);

    #[test]
    fn test_get_searches_outward() {
        let mut env = Environment::new();
        env.define(DeclId(0), Value::Integer(1));
        env.push_frame(F, None);
        assert_eq!(env.get(DeclId(0)), Some(&Value::Integer(1)));
        env.define(DeclId(0), Value::Integer(2));
        assert_eq!(env.get(DeclId(0)), Some(&Value::Integer(2)));
        env.pop_frame();
        assert_eq!(env.get(DeclId(0)), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_unbound_is_none() {
        let env = Environment::new();
        assert_eq!(env.get(DeclId(3)), None);
    }

    #[test]
    fn test_assign_updates_existing_binding() {
        let mut env = Environment::new();
        env.define(DeclId(0), Value::Integer(1));
        env.push_frame(F, None);
        env.assign(DeclId(0), Value::Integer(5));
        env.pop_frame();
        assert_eq!(env.get(DeclId(0)), Some(&Value::Integer(5)));
    }

    #[test]
    fn test_assign_unbound_goes_to_current_frame() {
        let mut env = Environment::new();
        env.push_frame(F, None);
        env.assign(DeclId(1), Value::Boolean(true));
        assert_eq!(env.get(DeclId(1)), Some(&Value::Boolean(true)));
        env.pop_frame();
        assert_eq!(env.get(DeclId(1)), None);
    }

    #[test]
    fn test_global_frame_never_popped() {
        let mut env = Environment::new();
        env.pop_frame();
        assert_eq!(env.depth(), 1);
        env.define(DeclId(0), Value::Null);
        assert_eq!(env.get(DeclId(0)), Some(&Value::Null));
    }

    #[test]
    fn test_callee_does_not_see_caller_bindings() {
        let mut env = Environment::new();
        env.push_frame(F, None);
        env.define(DeclId(1), Value::String("outer".into()));
        env.push_frame(F, None);
        assert_eq!(env.get(DeclId(1)), None);
        env.assign(DeclId(1), Value::Integer(2));
        env.pop_frame();
        assert_eq!(env.get(DeclId(1)), Some(&Value::String("outer".into())));
    }

    #[test]
    fn test_nested_function_sees_enclosing_activation() {
        let mut env = Environment::new();
        env.push_frame(F, None);
        env.define(DeclId(1), Value::Integer(1));
        env.push_frame(G, Some(F));
        assert_eq!(env.get(DeclId(1)), Some(&Value::Integer(1)));
        env.assign(DeclId(1), Value::Integer(7));
        env.pop_frame();
        assert_eq!(env.get(DeclId(1)), Some(&Value::Integer(7)));
    }

    #[test]
    fn test_sibling_call_skips_unrelated_frames() {
        let mut env = Environment::new();
        env.define(DeclId(0), Value::Null);
        env.push_frame(F, None);
        env.define(DeclId(1), Value::Integer(1));
        // G is top-level, so F's frame is not on its chain.
        env.push_frame(G, None);
        assert_eq!(env.get(DeclId(1)), None);
        assert_eq!(env.get(DeclId(0)), Some(&Value::Null));
    }
}
