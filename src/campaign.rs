//! Level sequence runner
//!
//! Owns the current level explicitly and moves through the plans: a won level
//! advances to the next plan, a lost level is rebuilt from the same plan.
//! Rendering and input stay with the host, which calls [`Campaign::step`]
//! once per frame.

use crate::error::{Error, Result};
use crate::levels::Plan;
use crate::parser::LevelParser;
use crate::sim::{Level, LevelStatus, tick};

/// What happened during one campaign step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignEvent {
    /// Current level still in progress (possibly in its finish countdown)
    Running,
    /// Level `index` finished as won; the next plan is loaded
    LevelWon { index: usize },
    /// Level `index` finished as lost; it has been reset
    LevelLost { index: usize },
    /// Last level won
    Completed,
}

#[derive(Debug)]
pub struct Campaign {
    plans: Vec<Plan>,
    parser: LevelParser,
    index: usize,
    level: Level,
    completed: bool,
}

impl Campaign {
    pub fn new(plans: Vec<Plan>, mut parser: LevelParser) -> Result<Self> {
        let Some(first) = plans.first() else {
            return Err(Error::InvalidArgument(
                "campaign needs at least one plan".to_string(),
            ));
        };
        let level = parser.parse(first.as_slice());
        Ok(Self {
            plans,
            parser,
            index: 0,
            level,
            completed: false,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Index of the plan currently being played
    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance the current level by one frame of `dt` seconds (clamped to
    /// the configured maximum tick) and handle level transitions.
    pub fn step(&mut self, dt: f32) -> Result<CampaignEvent> {
        if self.completed {
            return Ok(CampaignEvent::Completed);
        }

        let dt = self.parser.config().clamp_dt(dt);
        let status = tick(&mut self.level, dt)?;
        if !self.level.is_finished() {
            return Ok(CampaignEvent::Running);
        }

        let index = self.index;
        match status {
            LevelStatus::Won if index + 1 >= self.plans.len() => {
                log::info!("Campaign completed ({} levels)", self.plans.len());
                self.completed = true;
                Ok(CampaignEvent::Completed)
            }
            LevelStatus::Won => {
                self.index += 1;
                log::info!("Level {} won, loading level {}", index + 1, self.index + 1);
                self.load_current();
                Ok(CampaignEvent::LevelWon { index })
            }
            LevelStatus::Lost => {
                log::info!("Level {} lost, retrying", index + 1);
                self.load_current();
                Ok(CampaignEvent::LevelLost { index })
            }
            LevelStatus::Playing => Ok(CampaignEvent::Running),
        }
    }

    fn load_current(&mut self) {
        self.level = self.parser.parse(self.plans[self.index].as_slice());
    }
}
