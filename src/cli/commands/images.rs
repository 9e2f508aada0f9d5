//! Images command implementation.
//!
//! The `roost images` command lists what is in the image cache.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::{ImagesArgs, OutputFormat};
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::{Table, UserInterface};
use crate::vm::{format_size, CachedImage, ImageCache};

use super::dispatcher::{Command, CommandResult};

/// The images command implementation.
pub struct ImagesCommand {
    settings: Arc<SettingsManager>,
    args: ImagesArgs,
}

impl ImagesCommand {
    /// Create a new images command.
    pub fn new(settings: Arc<SettingsManager>, args: ImagesArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for ImagesCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.settings.load().await?;
        let cache = ImageCache::new(settings.cache_dir(self.settings.paths()));
        let images = cache.list().await?;

        match self.args.format {
            OutputFormat::Json => ui.message(&serde_json::to_string_pretty(&images)?),
            OutputFormat::Text if images.is_empty() => {
                ui.message(&format!("No cached images in {}", cache.root().display()));
            }
            OutputFormat::Text => ui.message(&render_table(&images)),
        }

        if !settings.caching_enabled {
            ui.warning("Image caching is disabled; enable it with `roost config caching set true`");
        }
        Ok(CommandResult::success())
    }
}

fn render_table(images: &[CachedImage]) -> String {
    let mut table = Table::new(&["NAME", "SIZE"]);
    for image in images {
        table.add_row(vec![image.name.clone(), format_size(image.size_bytes)]);
    }
    table.render()
}
