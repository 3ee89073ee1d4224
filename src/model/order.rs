//! Orders classes so that every class comes after all of its parents.
//!
//! Classes are taken from a queue sorted by id. A class whose parents have
//! all been emitted is emitted; otherwise it goes to the back of the queue.
//! A full pass over the queue without emitting anything means the remaining
//! classes are stuck behind a cycle, which is reported instead of looping.

use super::types::Class;
use crate::error::{ModelError, ModelResult};
use std::collections::{HashMap, HashSet, VecDeque};

pub fn order_classes(mut classes: Vec<Class>) -> ModelResult<Vec<Class>> {
    classes.sort_by(|a, b| a.id.cmp(&b.id));

    let known: HashSet<String> = classes.iter().map(|class| class.id.clone()).collect();
    let mut done: HashSet<String> = HashSet::with_capacity(classes.len());
    let mut ordered = Vec::with_capacity(classes.len());
    let mut queue: VecDeque<Class> = classes.into();

    // classes deferred since the last one was emitted
    let mut stalled = 0;

    while let Some(class) = queue.pop_front() {
        let ready = class
            .parent_ids
            .iter()
            .all(|parent| done.contains(parent) || !known.contains(parent));

        if ready {
            done.insert(class.id.clone());
            ordered.push(class);
            stalled = 0;
            continue;
        }

        queue.push_back(class);
        stalled += 1;
        if stalled >= queue.len() {
            return Err(ModelError::CyclicClassHierarchy {
                cycle: find_cycle(&queue),
            });
        }
    }

    Ok(ordered)
}

/// Walk parent edges among the stuck classes until one repeats.
///
/// Every stuck class has at least one stuck parent, so the walk always closes.
fn find_cycle(stuck: &VecDeque<Class>) -> Vec<String> {
    let parents: HashMap<&str, Vec<&str>> = stuck
        .iter()
        .map(|class| {
            (
                class.id.as_str(),
                class.parent_ids.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    let Some(mut current) = stuck.iter().map(|class| class.id.as_str()).min() else {
        return Vec::new();
    };

    let mut path: Vec<&str> = Vec::new();
    loop {
        if let Some(start) = path.iter().position(|id| *id == current) {
            let mut cycle: Vec<String> = path[start..].iter().map(|id| id.to_string()).collect();
            cycle.push(current.to_string());
            return cycle;
        }
        path.push(current);

        let next = parents.get(current).and_then(|ids| {
            ids.iter()
                .copied()
                .filter(|id| parents.contains_key(id))
                .min()
        });
        match next {
            Some(next) => current = next,
            None => return path.iter().map(|id| id.to_string()).collect(),
        }
    }
}
