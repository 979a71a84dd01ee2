use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use strain_config::StrainConfig;
use strain_core::{Message, Result, Snapshot, Source};
use strain_renderer::BarGraphVector;
use strain_system::CsvLogger;
use strain_theme::Theme;
use strain_widgets::{GraphWidget, HeaderWidget, SummaryPanel, SummaryWidget};
use tracing::{debug, info, warn};

/// Widest the summary column gets, in cells.
const SUMMARY_WIDTH: u16 = 34;

/// Everything the dashboard draws, and the handlers that change it.
pub struct App {
    config:      StrainConfig,
    config_path: PathBuf,
    theme:       Theme,
    graphs:      Vec<BarGraphVector>,
    panels:      Vec<SummaryPanel>,
    csv:         Option<CsvLogger<BufWriter<File>>>,
    smooth:      bool,
}

impl App {
    /// One graph and one summary panel per source, in the given order.
    pub fn new(
        config: StrainConfig,
        config_path: impl Into<PathBuf>,
        sources: Vec<Box<dyn Source>>,
        csv: Option<CsvLogger<BufWriter<File>>>,
    ) -> Result<Self> {
        let smooth = config.global.smooth;
        let mut graphs = Vec::with_capacity(sources.len());
        let mut panels = Vec::with_capacity(sources.len());

        for source in sources {
            let hidden = config.sources.hidden_for(source.name());
            panels.push(SummaryPanel::new(source.as_ref()));
            let mut graph = BarGraphVector::from_source(source, config.global.history, hidden)?;
            graph.set_smooth(smooth);
            graphs.push(graph);
        }

        Ok(Self {
            theme: Theme::from_config(&config.theme),
            config,
            config_path: config_path.into(),
            graphs,
            panels,
            csv,
            smooth,
        })
    }

    pub fn refresh_ms(&self) -> u64 {
        self.config.global.refresh_ms
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn graphs(&self) -> &[BarGraphVector] {
        &self.graphs
    }

    /// Apply one message.  Returns `false` once the dashboard should exit.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Tick => self.tick(),
            Message::Resize(cols, rows) => debug!("terminal resized to {cols}x{rows}"),
            Message::Reset => {
                info!("Resetting graphs");
                for graph in &mut self.graphs {
                    graph.reset();
                }
                for panel in &mut self.panels {
                    panel.reset();
                }
            }
            Message::ToggleSmooth => self.set_smooth(!self.smooth),
            Message::ConfigReloaded => self.reload(),
            Message::Quit => return false,
        }
        true
    }

    /// Poll every source, advance its graph, then log the new readings.
    fn tick(&mut self) {
        for (graph, panel) in self.graphs.iter_mut().zip(&mut self.panels) {
            if let Err(e) = graph.source_mut().update() {
                warn!("{} update failed: {e}", graph.source().name());
                continue;
            }
            graph.update();
            panel.observe(graph.source());
        }

        if let Some(csv) = &mut self.csv {
            let snapshot = Snapshot::capture(self.graphs.iter().map(BarGraphVector::source));
            if let Err(e) = csv.write(&snapshot) {
                warn!("CSV logging stopped: {e}");
                self.csv = None;
            }
        }
    }

    fn set_smooth(&mut self, smooth: bool) {
        debug!("smooth mode {}", if smooth { "on" } else { "off" });
        self.smooth = smooth;
        for graph in &mut self.graphs {
            graph.set_smooth(smooth);
        }
    }

    /// Re-read the config file; only the theme and smooth mode apply live.
    fn reload(&mut self) {
        match strain_config::load(&self.config_path) {
            Ok(config) => {
                info!("Config reloaded");
                self.theme = Theme::from_config(&config.theme);
                if config.global.smooth != self.config.global.smooth {
                    self.set_smooth(config.global.smooth);
                }
                self.config.theme = config.theme;
                self.config.global.smooth = config.global.smooth;
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.buffer_mut().set_style(area, self.theme.text());

        let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            HeaderWidget::new(&self.config.global.title, self.smooth, Local::now(), &self.theme),
            header,
        );

        let graphs_area = if self.config.global.summary && !self.panels.is_empty() {
            let width = SUMMARY_WIDTH.min(body.width / 3);
            let [summary, graphs] =
                Layout::horizontal([Constraint::Length(width), Constraint::Fill(1)]).areas(body);
            self.draw_summary(frame, summary);
            graphs
        } else {
            body
        };
        self.draw_graphs(frame, graphs_area);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        // One blank line between panels.
        let areas = Layout::vertical(
            self.panels.iter().map(|p| Constraint::Length(p.height() + 1)),
        )
        .split(area);
        for (panel, area) in self.panels.iter().zip(areas.iter()) {
            frame.render_widget(SummaryWidget::new(panel, &self.theme), *area);
        }
    }

    fn draw_graphs(&mut self, frame: &mut Frame, area: Rect) {
        if self.graphs.is_empty() {
            return;
        }
        let areas = Layout::vertical(self.graphs.iter().map(|_| Constraint::Fill(1))).split(area);
        for (graph, area) in self.graphs.iter_mut().zip(areas.iter()) {
            let surface = graph.render(area.width as usize, area.height as usize);
            frame.render_widget(GraphWidget::new(&surface, &self.theme), *area);
        }
    }
}
