use super::genetic_solver::ProgressCallback;
use log::{debug, info};

/// Reports search progress through the `log` facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, eligible: usize) {
        debug!(
            "Generation {} complete. Best score: {:.1}, eligible: {}",
            generation + 1,
            best_score,
            eligible
        );
    }

    fn on_repopulation(&mut self, generation: usize, stalled: usize) {
        info!(
            "Repopulating at generation {} after {} stalled generations",
            generation + 1,
            stalled
        );
    }
}

/// For callers that watch a search from another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_score: f64, eligible: usize },
    Repopulated { generation: usize, stalled: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64, eligible: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_score,
            eligible,
        });
    }

    fn on_repopulation(&mut self, generation: usize, stalled: usize) {
        let _ = self.sender.send(ProgressMessage::Repopulated { generation, stalled });
    }
}
