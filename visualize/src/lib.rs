// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Tree drawing for Merkle tree components.
//!
//! A [`Drawer`] wraps any `io::Write` and keeps track of the branch
//! connectors of every open ancestor, so implementors of [`Visualize`] only
//! decide which node comes next and whether it is the last of its siblings.

use std::io::{Result, Write};

use itertools::Itertools;

/// Number of hex characters shown for a digest.
pub static HEX_LEN: usize = 8;

const BRANCH: &str = "├── ";
const TAIL: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Pretty visualization of Merkle tree components.
pub trait Visualize {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// A `io::Write` proxy to prepend branch connectors to draw trees
pub struct Drawer<W: Write> {
    /// One entry per open ancestor, `true` if that ancestor was the last
    /// child of its parent.
    ancestors: Vec<bool>,
    current_tail: Option<bool>,
    write: W,
}

impl<W: Write> Drawer<W> {
    pub fn new(write: W) -> Self {
        Drawer {
            ancestors: Vec::new(),
            current_tail: None,
            write,
        }
    }

    fn prefix(&self) -> String {
        self.ancestors
            .iter()
            .map(|is_tail| if *is_tail { SPACE } else { PIPE })
            .collect()
    }

    /// Start a new node line at the current depth.
    pub fn branch(&mut self, is_tail: bool) -> Result<()> {
        let connector = if is_tail { TAIL } else { BRANCH };
        let line = format!("{}{}", self.prefix(), connector);
        self.write.write_all(line.as_bytes())?;
        self.current_tail = Some(is_tail);
        Ok(())
    }

    /// Finish the current node line.
    pub fn end_branch(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        Ok(())
    }

    /// Descend below the node drawn last.
    pub fn down(&mut self) {
        self.ancestors.push(self.current_tail.unwrap_or(true));
    }

    pub fn up(&mut self) {
        self.current_tail = self.ancestors.pop();
    }

    /// Write a label; continuation lines stay aligned under the node.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let sep = match self.current_tail {
            Some(is_tail) => {
                let extension = if is_tail { SPACE } else { PIPE };
                format!("\n{}{}", self.prefix(), extension)
            }
            None => String::from("\n"),
        };
        let lines_iter = buf.split(|c| *c == b'\n');
        for line in Itertools::intersperse(lines_iter, sep.as_bytes()) {
            self.write.write_all(line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.write.flush()
    }
}

/// First [`HEX_LEN`] hex characters of `bytes` followed by `...`.
pub fn hex_prefix(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    if encoded.len() > HEX_LEN {
        format!("{}...", &encoded[..HEX_LEN])
    } else {
        encoded
    }
}

impl Visualize for [u8] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(hex_prefix(self).as_bytes())?;
        Ok(drawer)
    }
}

impl<const N: usize> Visualize for [u8; N] {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

impl<T: Visualize + ?Sized> Visualize for &T {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        (*self).visualize(drawer)
    }
}

/// `visualize` shortcut to write straight into stdout
pub fn visualize_stdout<T: Visualize + ?Sized>(value: &T) -> Result<()> {
    let out = std::io::stdout();
    let mut drawer = value.visualize(Drawer::new(out.lock()))?;
    drawer.flush()
}

/// `visualize` shortcut to write into provided buffer, should be a `Vec` not a
/// slice because slices won't grow if needed.
pub fn visualize_to_vec<T: Visualize + ?Sized>(v: &mut Vec<u8>, value: &T) {
    let drawer = Drawer::new(v);
    value
        .visualize(drawer)
        .expect("error while writing into a vector");
}
