use colored::{ColoredString, Colorize};
use supports_color::Stream;

use crate::application::data::PathList;
use selectree::selection::CheckState;
use selectree::tree::SelectionTree;

/// Writes path lists to stdout, colored by state when the terminal allows it.
pub struct PathPrinter;

impl PathPrinter {
    pub fn new() -> Self {
        let enabled = supports_color::on(Stream::Stdout).is_some();
        colored::control::set_override(enabled);
        Self
    }

    pub fn print(&self, list: PathList, tree: &SelectionTree) {
        println!("{}", format!("# {list:?}").bold());
        match list.check_state() {
            Some(state) => {
                for path in tree.paths_by_state(state) {
                    println!("{}", paint(&path, state));
                }
            }
            None => {
                for path in tree.changed_paths() {
                    let state = tree
                        .resolve(&path)
                        .and_then(|id| tree.node(id).map(|node| node.check_state()));
                    match state {
                        Ok(state) => println!("{}", paint(&path, state)),
                        Err(_) => println!("{}", path.dimmed()),
                    }
                }
            }
        }
    }
}

fn paint(path: &str, state: CheckState) -> ColoredString {
    match state {
        CheckState::Checked => path.green(),
        CheckState::Partial => path.yellow(),
        CheckState::Unchecked => path.red(),
    }
}
