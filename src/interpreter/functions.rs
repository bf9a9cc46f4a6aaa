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
use std::rc::Rc;

use crate::ast::FunctionDecl;

/// Name to declaration table, filled once before the entry sequence runs.
///
/// Entries are shared with running calls through `Rc`, so a body can
/// execute while the interpreter is mutably borrowed.
#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Rc<FunctionDecl>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `decl`, replacing any earlier function of the same name.
    pub fn register(&mut self, decl: FunctionDecl) {
        self.functions.insert(decl.name.clone(), Rc::new(decl));
    }

    pub fn register_all(&mut self, decls: &[FunctionDecl]) {
        for decl in decls {
            self.register(decl.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn decl(name: &str, params: &[&str]) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            body: vec![],
            span: Span::new(1, 1),
        }
    }

    #[test]
    fn last_definition_wins() {
        let mut registry = FunctionRegistry::new();
        registry.register_all(&[decl("f", &["a"]), decl("g", &[]), decl("f", &["a", "b"])]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("f").map(|f| f.params.len()), Some(2));
        assert!(registry.contains("g"));
        assert!(registry.get("h").is_none());
    }
}
