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

//! Opt-in evaluation trace.
//!
//! Each event is one stderr line: a local timestamp, then the message
//! indented by the current call depth.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, Default)]
pub struct Tracer {
    enabled: bool,
}

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs one event. `message` is only built when tracing is on.
    pub fn event(&self, depth: usize, message: impl FnOnce() -> String) {
        if self.enabled {
            eprintln!("{}", format_line(Local::now(), depth, &message()));
        }
    }
}

fn format_line(at: DateTime<Local>, depth: usize, message: &str) -> String {
    format!(
        "[{}] trace: {}{}",
        at.format("%H:%M:%S%.3f"),
        "  ".repeat(depth),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn lines_are_timestamped_and_indented() {
        let at = Local
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            format_line(at, 2, "call f(1)"),
            "[03:04:05.000] trace:     call f(1)"
        );
    }

    #[test]
    fn disabled_tracer_never_builds_messages() {
        let tracer = Tracer::new(false);
        tracer.event(0, || panic!("message must not be built"));
        assert!(!tracer.is_enabled());
    }
}
