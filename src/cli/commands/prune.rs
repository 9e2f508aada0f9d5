//! Prune command implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::PruneArgs;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::{format_size, ImageCache};

use super::dispatcher::{Command, CommandResult};

/// The prune command implementation.
pub struct PruneCommand {
    settings: Arc<SettingsManager>,
    args: PruneArgs,
}

impl PruneCommand {
    /// Create a new prune command.
    pub fn new(settings: Arc<SettingsManager>, args: PruneArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for PruneCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cache = ImageCache::new(self.settings.cache_dir().await?);
        let images = cache.list().await?;
        if images.is_empty() {
            ui.message("Cache is already empty");
            return Ok(CommandResult::success());
        }

        if !self.args.force && ui.is_interactive() {
            let total: u64 = images.iter().map(|i| i.size_bytes).sum();
            let question = format!(
                "Remove {} cached images ({})?",
                images.len(),
                format_size(total)
            );
            if !ui.confirm(&question, false)? {
                ui.message("Cancelled.");
                return Ok(CommandResult::success());
            }
        }

        let report = cache.clear().await?;
        ui.success(&format!(
            "Removed {} cached images ({} freed)",
            report.removed,
            format_size(report.freed_bytes)
        ));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    async fn seeded(temp: &TempDir) -> (Arc<SettingsManager>, std::path::PathBuf) {
        let settings = testing::settings(temp);
        let cache_dir = settings.cache_dir().await.unwrap();
        std::fs::create_dir_all(cache_dir.join("ubuntu")).unwrap();
        std::fs::write(cache_dir.join("ubuntu/disk.img"), vec![0u8; 1024]).unwrap();
        std::fs::write(cache_dir.join("alpine.img"), vec![0u8; 1024]).unwrap();
        (settings, cache_dir)
    }

    #[tokio::test]
    async fn removes_everything() {
        let temp = TempDir::new().unwrap();
        let (settings, cache_dir) = seeded(&temp).await;
        let mut ui = MockUI::new();

        PruneCommand::new(settings, PruneArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(ui.successes(), ["Removed 2 cached images (2KB freed)"]);
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn declined_prompt_keeps_cache() {
        let temp = TempDir::new().unwrap();
        let (settings, cache_dir) = seeded(&temp).await;
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.queue_confirm(false);

        PruneCommand::new(settings, PruneArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(ui.confirms_asked(), ["Remove 2 cached images (2KB)?"]);
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn empty_cache_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        PruneCommand::new(testing::settings(&temp), PruneArgs { force: true })
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(ui.messages(), ["Cache is already empty"]);
    }
}
