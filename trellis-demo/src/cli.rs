use std::time::Duration;

use trellis::AppConfig;

/// Which demo layout to show.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Fixed-width sidebar with a profile card, items and main content
    Sidebar,
    /// A single label in a red column
    #[default]
    Banner,
}

#[derive(clap::Parser, Debug)]
#[command(name = "trellis-demo", version, about = "Immediate-mode layout demo", long_about = None)]
pub struct Arguments {
    /// Layout to declare every frame
    #[arg(long, value_enum, default_value_t)]
    pub layout: Layout,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Initial window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Pause between frames, in microseconds
    #[arg(long)]
    frame_pause_us: Option<u64>,

    /// Dump the layout tree every frame (visible at debug level)
    #[clap(long, action = clap::ArgAction::SetTrue)]
    debug_layout: bool,

    /// Report sampled frame timings (visible at debug level)
    #[clap(long, action = clap::ArgAction::SetTrue)]
    frame_timing: bool,

    /// Emit commands for elements outside the window too
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_culling: bool,
}

impl Arguments {
    pub fn update_config(&self, config: &mut AppConfig) {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.window_size.0 = width;
        }
        if let Some(height) = self.height {
            config.window_size.1 = height;
        }
        if let Some(pause) = self.frame_pause_us {
            config.frame_pause = Duration::from_micros(pause);
        }
        config.debug_layout |= self.debug_layout;
        config.frame_timing |= self.frame_timing;
        config.culling &= !self.no_culling;
    }
}
