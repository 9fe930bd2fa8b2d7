// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Silent-on-failure view of a [`Namespace`].
//!
//! Every method performs the same operation as its checked counterpart but
//! drops the error: a failing call changes nothing and returns nothing.
//! Listing an unresolvable directory yields an empty list, reading a
//! missing file yields `None`.

use std::path::Path;

use crate::error::Result;
use crate::namespace::Namespace;
use diagnostics::log_debug;

pub struct Compat<'a> {
    ns: &'a mut Namespace,
}

impl Namespace {
    /// Wraps this namespace in the silent-on-failure interface
    pub fn compat(&mut self) -> Compat<'_> {
        Compat { ns: self }
    }
}

fn quiet<T>(op: &str, result: Result<T>) -> Option<T> {
    result
        .inspect_err(|err| log_debug!("{op} failed: {detail}", op: op, detail: err.to_string()))
        .ok()
}

impl Compat<'_> {
    pub fn mkdir(&mut self, path: &str) {
        _ = quiet("mkdir", self.ns.mkdir(path));
    }

    pub fn touch(&mut self, path: &str) {
        _ = quiet("touch", self.ns.touch(path));
    }

    pub fn cd(&mut self, path: &str) {
        _ = quiet("cd", self.ns.cd(path));
    }

    pub fn ls(&self, path: Option<&str>) -> Vec<String> {
        quiet("ls", self.ns.ls(path)).unwrap_or_default()
    }

    pub fn mv(&mut self, source: &str, destination: &str) {
        _ = quiet("mv", self.ns.mv(source, destination));
    }

    pub fn cp(&mut self, source: &str, destination: &str) {
        _ = quiet("cp", self.ns.cp(source, destination));
    }

    pub fn rm(&mut self, path: &str) {
        _ = quiet("rm", self.ns.rm(path));
    }

    pub fn cat(&self, path: &str) -> Option<String> {
        quiet("cat", self.ns.cat(path))
    }

    pub fn echo(&mut self, text: &str, path: &str) {
        _ = quiet("echo", self.ns.echo(text, path));
    }

    pub fn grep(&self, pattern: &str, path: &str) -> Vec<String> {
        quiet("grep", self.ns.grep(pattern, path)).unwrap_or_default()
    }

    pub fn pwd(&self) -> String {
        self.ns.pwd()
    }

    pub fn tree_view(&self, path: Option<&str>) -> Option<String> {
        quiet("tree", self.ns.tree_view(path))
    }

    pub fn save_state<P: AsRef<Path>>(&self, file: P) {
        _ = quiet("save_state", self.ns.save_state(file));
    }

    /// On failure the current namespace is kept as it was.
    pub fn load_state<P: AsRef<Path>>(&mut self, file: P) {
        _ = quiet("load_state", self.ns.load_state(file));
    }
}
