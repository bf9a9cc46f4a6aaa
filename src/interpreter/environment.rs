/*
 * ==========================================================================
 * PAWCALC - Code with Claws!
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::HashMap;

use crate::error::{CalcError, CalcResult};
use crate::value::Value;

/// One name-to-value layer of the scope stack.
pub type Frame = HashMap<String, Value>;

/// The scope stack.
///
/// Frame 0 is the global frame and is never popped. Every user-function
/// call pushes one frame for its parameters.
///
/// Visibility is dynamic: a lookup walks the live stack from the innermost
/// frame outwards, so a callee sees (and can overwrite) its callers'
/// variables.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn get(&self, name: &str) -> CalcResult<Value> {
        self.lookup(name)
            .ok_or_else(|| CalcError::undefined_variable(name))
    }

    /// Updates the innermost existing binding in place, or creates a new
    /// binding in the current frame.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
        {
            *slot = value;
            return;
        }

        self.current_mut().insert(name.to_string(), value);
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Number of frames, the global frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_walk_from_innermost_frame() {
        let mut env = Environment::new();
        env.set("x", Value::Int(1));
        env.push_frame(Frame::from([("x".to_string(), Value::Int(2))]));

        assert_eq!(env.get("x"), Ok(Value::Int(2)));
        env.pop_frame();
        assert_eq!(env.get("x"), Ok(Value::Int(1)));
    }

    #[test]
    fn writes_update_the_binding_frame() {
        let mut env = Environment::new();
        env.set("total", Value::Int(0));
        env.push_frame(Frame::new());

        env.set("total", Value::Int(5));
        env.set("local", Value::Int(7));

        env.pop_frame();
        assert_eq!(env.lookup("total"), Some(Value::Int(5)));
        assert_eq!(env.lookup("local"), None);
    }

    #[test]
    fn missing_names_are_undefined_variables() {
        let err = Environment::new().get("nope").unwrap_err();
        assert_eq!(err.code(), "E_REFERENCE");
        assert_eq!(err.message(), "undefined variable 'nope'");
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut env = Environment::new();
        assert!(env.pop_frame().is_none());
        assert_eq!(env.depth(), 1);
    }
}
