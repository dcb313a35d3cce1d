// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{Callback, Encapsulator, Execute, Params, encapsulator_fn};

/// Records the order in which layers and the callback run.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
    pub calls: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn callback(&self) -> impl Callback<(), Out = ()> + 'static {
        let recorder = self.clone();

        Execute::new(move |_: Params<()>| {
            recorder.calls.fetch_add(1, Ordering::Relaxed);
            recorder.push("callback".to_string());
        })
    }

    pub fn layer(&self, tag: &'static str) -> impl Encapsulator<(), ()> + 'static {
        let recorder = self.clone();

        encapsulator_fn(move |callback: &dyn Callback<(), Out = ()>, params: Params<()>| {
            recorder.push(format!("enter {tag}"));
            callback.call(params);
            recorder.push(format!("exit {tag}"));
        })
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    fn push(&self, entry: String) {
        self.entries.lock().unwrap().push(entry);
    }
}

pub(crate) fn recorded(entries: &[&str]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}
