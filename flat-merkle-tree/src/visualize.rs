//! Tree drawing, root on top and right subtree above left subtree.

use std::io::{self, Write};

use flat_merkle_visualize::{visualize_stdout, visualize_to_vec, Drawer, Visualize};

use crate::{hash::CryptoHash, index, MerkleTree};

impl<T> Visualize for MerkleTree<T> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> io::Result<Drawer<W>> {
        if self.nodes().is_empty() {
            drawer.write(b"Empty tree\n")?;
            return Ok(drawer);
        }
        draw_node(self.nodes(), 0, true, drawer)
    }
}

fn draw_node<W: Write>(
    nodes: &[CryptoHash],
    position: usize,
    is_tail: bool,
    mut drawer: Drawer<W>,
) -> io::Result<Drawer<W>> {
    drawer.branch(is_tail)?;
    drawer = nodes[position].visualize(drawer)?;
    drawer.end_branch()?;

    let left = index::left_child(position);
    let right = index::right_child(position);
    if left < nodes.len() || right < nodes.len() {
        drawer.down();
        if right < nodes.len() {
            drawer = draw_node(nodes, right, false, drawer)?;
        }
        if left < nodes.len() {
            drawer = draw_node(nodes, left, true, drawer)?;
        }
        drawer.up();
    }
    Ok(drawer)
}

impl<T> MerkleTree<T> {
    /// Draw the tree to stdout.
    pub fn print(&self) -> io::Result<()> {
        visualize_stdout(self)
    }

    /// Draw the tree into a string.
    pub fn draw(&self) -> String {
        let mut out = Vec::new();
        visualize_to_vec(&mut out, self);
        String::from_utf8_lossy(&out).into_owned()
    }
}
