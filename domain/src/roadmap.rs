//! Execution roadmaps: listing, generation from a strategy, and task
//! progress.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub id: String,
    #[serde(default)]
    pub phase_number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub tasks: Vec<RoadmapTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub total_duration_weeks: u32,
    /// Percentage from 0 to 100
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub phases: Vec<RoadmapPhase>,
    #[serde(default)]
    pub milestones: Vec<serde_json::Value>,
}

/// `GET /roadmaps` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapList {
    #[serde(default)]
    pub roadmaps: Vec<Roadmap>,
}

impl Roadmap {
    /// Flip one task and recompute progress.
    pub fn toggle_task(&mut self, phase_id: &str, task_id: &str) -> Result<(), RoadmapError> {
        let task = self
            .phases
            .iter_mut()
            .find(|p| p.id == phase_id)
            .and_then(|p| p.tasks.iter_mut().find(|t| t.id == task_id))
            .ok_or_else(|| RoadmapError::TaskNotFound {
                phase_id: phase_id.to_string(),
                task_id: task_id.to_string(),
            })?;
        task.is_completed = !task.is_completed;
        self.progress = self.completion_percent();
        Ok(())
    }

    /// Whole-number share of completed tasks; 0 without tasks.
    pub fn completion_percent(&self) -> f64 {
        let tasks = self.phases.iter().flat_map(|p| &p.tasks);
        let (total, completed) = tasks.fold((0usize, 0usize), |(total, done), t| {
            (total + 1, done + usize::from(t.is_completed))
        });
        if total == 0 {
            return 0.0;
        }
        (completed as f64 / total as f64 * 100.0).round()
    }

    /// Local four-phase plan used when `/roadmaps/generate` is unavailable.
    pub fn fallback(id: String, title: &str) -> Self {
        const PHASES: [(&str, &str, u32, [&str; 4]); 4] = [
            (
                "Phase 1: Research & Validation",
                "Validate the idea and understand the market",
                3,
                [
                    "Market Research",
                    "Competitor Analysis",
                    "Customer Interviews",
                    "Validate Problem-Solution Fit",
                ],
            ),
            (
                "Phase 2: Planning & Strategy",
                "Define scope and create execution plan",
                2,
                [
                    "Define MVP Scope",
                    "Create Project Timeline",
                    "Resource Allocation",
                    "Define Success Metrics",
                ],
            ),
            (
                "Phase 3: Build & Test",
                "Build MVP and validate with real users",
                4,
                [
                    "Build MVP Core Features",
                    "Internal Testing & QA",
                    "Beta Testing with Real Users",
                    "Iterate Based on Feedback",
                ],
            ),
            (
                "Phase 4: Launch & Growth",
                "Launch to market and acquire users",
                3,
                [
                    "Prepare Marketing Materials",
                    "Soft Launch",
                    "Full Public Launch",
                    "Post-Launch Optimization",
                ],
            ),
        ];

        let phases = PHASES
            .iter()
            .enumerate()
            .map(|(i, (name, description, weeks, tasks))| RoadmapPhase {
                id: format!("p{}", i + 1),
                phase_number: i as u32 + 1,
                name: name.to_string(),
                description: description.to_string(),
                duration_weeks: *weeks,
                tasks: tasks
                    .iter()
                    .enumerate()
                    .map(|(j, title)| RoadmapTask {
                        id: format!("t{}", i * tasks.len() + j + 1),
                        title: title.to_string(),
                        description: None,
                        is_completed: false,
                    })
                    .collect(),
            })
            .collect();

        Self {
            id,
            title: format!("{} Execution Plan", title),
            description: None,
            total_duration_weeks: 12,
            progress: 0.0,
            phases,
            milestones: Vec::new(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoadmapError {
    #[error("Task {task_id} not found in phase {phase_id}")]
    TaskNotFound { phase_id: String, task_id: String },
}

/// `POST /roadmaps/generate` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRoadmapRequest {
    pub strategy_title: String,
    pub strategy_description: String,
    pub available_runway_months: u32,
    pub team_size: u32,
    pub priority: String,
}

impl GenerateRoadmapRequest {
    pub fn new(title: &str, description: Option<&str>) -> Self {
        let strategy_description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => format!(
                "Execute the strategy: {}. Focus on validating the concept, building an MVP, and acquiring early customers.",
                title
            ),
        };
        Self {
            strategy_title: title.to_string(),
            strategy_description,
            available_runway_months: 12,
            team_size: 3,
            priority: "high".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedPhase {
    pub phase_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub tasks: Vec<GeneratedTask>,
}

/// `POST /roadmaps/generate` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRoadmap {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub strategy_description: Option<String>,
    #[serde(default)]
    pub total_duration_weeks: u32,
    #[serde(default)]
    pub phases: Vec<GeneratedPhase>,
}

impl From<GeneratedRoadmap> for Roadmap {
    fn from(generated: GeneratedRoadmap) -> Self {
        let phases = generated
            .phases
            .into_iter()
            .map(|phase| RoadmapPhase {
                id: format!("phase_{}", phase.phase_number),
                phase_number: phase.phase_number,
                name: phase.title,
                description: phase.description,
                duration_weeks: phase.duration_weeks,
                tasks: phase
                    .tasks
                    .into_iter()
                    .map(|task| RoadmapTask {
                        id: task.id,
                        title: task.title,
                        description: task.description,
                        is_completed: task.is_completed,
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: generated.id,
            title: generated.title,
            description: generated.strategy_description,
            total_duration_weeks: generated.total_duration_weeks,
            progress: 0.0,
            phases,
            milestones: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub suggested_team_size: u32,
    #[serde(default)]
    pub typical_duration_weeks: u32,
}

/// `GET /roadmaps/templates` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoadmapTemplateList {
    #[serde(default)]
    pub templates: Vec<RoadmapTemplate>,
}
