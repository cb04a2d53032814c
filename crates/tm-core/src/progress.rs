//! Progress reporting
//!
//! Each stage hands the grid to a [`ProgressSink`] after every batch of
//! mutations. Sinks are plain consumers: they never write back.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::grid::Grid;

/// Generation stage that produced a snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Tower,
    Rooms,
    Maze,
    Doors,
    ExtraConnections,
    DeadEnds,
    Complete,
}

/// Borrowed view of the grid handed to a sink
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub stage: Stage,
    pub grid: &'a Grid,
    /// Pixel size of one cell in rendered output
    pub cell_size: u32,
}

/// Consumer of generation snapshots (renderers, recorders, loggers)
pub trait ProgressSink {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>);
}

/// Sink that ignores every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn snapshot(&mut self, _snapshot: &Snapshot<'_>) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Owned copy of one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub stage: Stage,
    pub grid: Grid,
}

/// Sink that keeps a copy of every snapshot, for replay and tests
#[derive(Debug, Default, Clone)]
pub struct SnapshotRecorder {
    frames: Vec<Frame>,
    /// Keep at most this many frames; older frames are thinned out
    limit: Option<usize>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that keeps memory bounded by dropping every other frame
    /// whenever `limit` is reached. Stage boundaries are always kept.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit: Some(limit.max(2)),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Number of frames recorded for a stage
    pub fn count(&self, stage: Stage) -> usize {
        self.frames.iter().filter(|f| f.stage == stage).count()
    }

    fn thin(&mut self) {
        let mut keep = Vec::with_capacity(self.frames.len() / 2 + 1);
        let last = self.frames.len().saturating_sub(1);
        for (i, frame) in self.frames.drain(..).enumerate() {
            let boundary = keep.last().is_none_or(|prev: &Frame| prev.stage != frame.stage);
            if i % 2 == 0 || i == last || boundary {
                keep.push(frame);
            }
        }
        self.frames = keep;
    }
}

impl ProgressSink for SnapshotRecorder {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(limit) = self.limit
            && self.frames.len() >= limit
        {
            self.thin();
        }
        self.frames.push(Frame {
            stage: snapshot.stage,
            grid: snapshot.grid.clone(),
        });
    }
}

/// Batches mutations and forwards snapshots to an optional sink
pub struct Pacer<'s> {
    sink: Option<&'s mut dyn ProgressSink>,
    cell_size: u32,
    batch: usize,
    pending: usize,
}

impl<'s> Pacer<'s> {
    /// Pacer that emits after every `batch` ticks
    pub fn new(sink: &'s mut dyn ProgressSink, cell_size: u32, batch: usize) -> Self {
        Self {
            sink: Some(sink),
            cell_size,
            batch: batch.max(1),
            pending: 0,
        }
    }

    /// Pacer without a sink
    pub fn silent() -> Self {
        Self {
            sink: None,
            cell_size: 1,
            batch: 1,
            pending: 0,
        }
    }

    /// Snapshot batch size
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Count one mutation and emit when `every` mutations have piled up
    pub fn tick(&mut self, stage: Stage, grid: &Grid, every: usize) {
        self.pending += 1;
        if self.pending >= every.max(1) {
            self.emit(stage, grid);
        }
    }

    /// Emit a snapshot now
    pub fn emit(&mut self, stage: Stage, grid: &Grid) {
        self.pending = 0;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.snapshot(&Snapshot {
                stage,
                grid,
                cell_size: self.cell_size,
            });
        }
    }

    /// Emit only when ticks are pending (closes a stage's last partial batch)
    pub fn flush(&mut self, stage: Stage, grid: &Grid) {
        if self.pending > 0 {
            self.emit(stage, grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;

    #[test]
    fn test_pacer_batches_ticks() {
        let mut recorder = SnapshotRecorder::new();
        let grid = Grid::new(3);
        {
            let mut pacer = Pacer::new(&mut recorder, 4, 3);
            for _ in 0..7 {
                pacer.tick(Stage::Tower, &grid, 3);
            }
            pacer.flush(Stage::Tower, &grid);
        }
        // 3 + 3 full batches plus the flushed remainder
        assert_eq!(recorder.count(Stage::Tower), 3);
    }

    #[test]
    fn test_flush_without_pending_is_silent() {
        let mut recorder = SnapshotRecorder::new();
        let grid = Grid::new(3);
        {
            let mut pacer = Pacer::new(&mut recorder, 1, 1);
            pacer.flush(Stage::Maze, &grid);
        }
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |s: &Snapshot<'_>| seen.push((s.stage, s.cell_size));
        let grid = Grid::new(1);
        {
            let mut pacer = Pacer::new(&mut sink, 8, 1);
            pacer.emit(Stage::Complete, &grid);
        }
        assert_eq!(seen, vec![(Stage::Complete, 8)]);
    }

    #[test]
    fn test_recorder_copies_grid() {
        let mut recorder = SnapshotRecorder::new();
        let mut grid = Grid::new(2);
        {
            let mut pacer = Pacer::new(&mut recorder, 1, 1);
            pacer.emit(Stage::Rooms, &grid);
        }
        grid.set(0, 0, CellKind::Path);
        assert_eq!(recorder.frames()[0].grid.get(0, 0), CellKind::Box);
    }

    #[test]
    fn test_recorder_limit_keeps_stage_boundaries() {
        let mut recorder = SnapshotRecorder::with_limit(4);
        let stages = [
            Stage::Tower,
            Stage::Tower,
            Stage::Tower,
            Stage::Tower,
            Stage::Maze,
            Stage::Maze,
            Stage::Complete,
        ];
        // grid size tags each frame with its arrival index
        for (index, stage) in stages.into_iter().enumerate() {
            recorder.snapshot(&Snapshot {
                stage,
                grid: &Grid::new(index + 1),
                cell_size: 1,
            });
        }
        let kept: Vec<(usize, Stage)> = recorder
            .frames()
            .iter()
            .map(|f| (f.grid.size() - 1, f.stage))
            .collect();
        assert_eq!(
            kept,
            vec![
                (0, Stage::Tower),
                (4, Stage::Maze),
                (5, Stage::Maze),
                (6, Stage::Complete),
            ]
        );
    }

    #[test]
    fn test_silent_pacer() {
        let grid = Grid::new(1);
        let mut pacer = Pacer::silent();
        pacer.tick(Stage::DeadEnds, &grid, 1);
        pacer.emit(Stage::Complete, &grid);
    }
}
