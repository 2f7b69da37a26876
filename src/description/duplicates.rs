use std::collections::HashSet;
use std::path::PathBuf;

use saphyr_parser::{Event, Parser, ScanError};

/// Where the event walk currently is.
enum Frame {
    Mapping {
        path: PathBuf,
        seen: HashSet<String>,
        pending_key: Option<String>,
        expecting_key: bool,
    },
    Sequence {
        path: PathBuf,
    },
}

/// Finds the first repeated mapping key in the first document of `contents`
/// and returns its path from the document root.
///
/// Loading into `Yaml` already collapses repeated keys (the last one wins),
/// so they are only visible at the event level.
pub fn find_duplicate_key(contents: &str) -> Result<Option<PathBuf>, ScanError> {
    let mut frames: Vec<Frame> = Vec::new();

    for event in Parser::new_from_str(contents) {
        let (event, _span) = event?;
        match event {
            Event::Scalar(value, ..) => {
                if let Some(Frame::Mapping {
                    path,
                    seen,
                    pending_key,
                    expecting_key,
                }) = frames.last_mut()
                {
                    if *expecting_key {
                        if !seen.insert(value.to_string()) {
                            return Ok(Some(path.join(value.as_ref())));
                        }
                        *pending_key = Some(value.into_owned());
                        *expecting_key = false;
                        continue;
                    }
                }
                begin_node(&mut frames);
            }
            Event::Alias(_) => {
                begin_node(&mut frames);
            }
            Event::MappingStart(..) => {
                let path = begin_node(&mut frames);
                frames.push(Frame::Mapping {
                    path,
                    seen: HashSet::new(),
                    pending_key: None,
                    expecting_key: true,
                });
            }
            Event::SequenceStart(..) => {
                let path = begin_node(&mut frames);
                frames.push(Frame::Sequence { path });
            }
            Event::MappingEnd | Event::SequenceEnd => {
                frames.pop();
            }
            Event::DocumentEnd => break,
            _ => {}
        }
    }

    Ok(None)
}

/// Accounts for a node starting inside the innermost frame and returns the
/// path that node lives at.
fn begin_node(frames: &mut [Frame]) -> PathBuf {
    match frames.last_mut() {
        Some(Frame::Mapping {
            path,
            pending_key,
            expecting_key,
            ..
        }) => {
            let node_path = match pending_key.take() {
                Some(key) => path.join(key),
                None => path.clone(),
            };
            *expecting_key = !*expecting_key;
            node_path
        }
        Some(Frame::Sequence { path }) => path.clone(),
        None => PathBuf::new(),
    }
}
