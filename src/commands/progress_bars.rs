//! Terminal progress bars for the dataset commands.
//!
//! One bar tracks the deployments of the current collection and, below it,
//! a second bar tracks the files of the current deployment. Bars draw to
//! stderr and disappear when it is not a terminal.

use std::cell::RefCell;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use wildintel_tools::progress::Progress;

fn collection_style() -> ProgressStyle {
    match ProgressStyle::default_bar()
        .template("{prefix:>12.bold} [{bar:30.cyan/blue}] {pos}/{len} deployments")
    {
        Ok(style) => style.progress_chars("##-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

fn deployment_style() -> ProgressStyle {
    match ProgressStyle::default_bar()
        .template("{prefix:>12} [{bar:30.green/white}] {pos}/{len} files {msg}")
    {
        Ok(style) => style.progress_chars("=>-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

/// [`Progress`] drawn with `indicatif`.
#[derive(Default)]
pub struct BarProgress {
    multi: MultiProgress,
    collection: RefCell<Option<ProgressBar>>,
    deployment: RefCell<Option<ProgressBar>>,
}

impl Progress for BarProgress {
    fn collection_start(&self, collection: &str, total_deployments: usize) {
        let bar = self
            .multi
            .add(ProgressBar::new(total_deployments as u64).with_style(collection_style()));
        bar.set_prefix(collection.to_string());
        *self.collection.borrow_mut() = Some(bar);
    }

    fn deployment_start(&self, _collection: &str, deployment: &str, total_files: usize) {
        let bar = self
            .multi
            .add(ProgressBar::new(total_files as u64).with_style(deployment_style()));
        bar.set_prefix(deployment.to_string());
        if let Some(old) = self.deployment.borrow_mut().replace(bar) {
            old.finish_and_clear();
        }
    }

    fn file_done(&self, _collection: &str, _deployment: &str) {
        if let Some(bar) = self.deployment.borrow().as_ref() {
            bar.inc(1);
        }
    }

    fn deployment_done(&self, _collection: &str, _deployment: &str) {
        if let Some(bar) = self.deployment.borrow_mut().take() {
            bar.finish_and_clear();
        }
        if let Some(bar) = self.collection.borrow().as_ref() {
            bar.inc(1);
        }
    }

    fn collection_done(&self, _collection: &str) {
        if let Some(bar) = self.collection.borrow_mut().take() {
            bar.finish();
        }
    }
}
