//! Request and response bodies for the program-cycle endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::program_cycle::ProgramCycleDetails;
use crate::domain::foundation::{ContextId, ProgramCycleId, TrackId};
use crate::domain::program_cycle::{ProgramCycle, ProgramCyclePatch, ProgramCycleStatus};
use crate::ports::{ContextRef, TrackRef};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgramCycleRequest {
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ProgramCycleStatus>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// PATCH body. Unknown fields, `status` included, are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProgramCycleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateProgramCycleRequest> for ProgramCyclePatch {
    fn from(req: UpdateProgramCycleRequest) -> Self {
        ProgramCyclePatch {
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ProgramCycleStatus,
}

/// Query string of `GET /program-cycles/active`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveCyclesParams {
    pub context_id: Option<ContextId>,
    pub track_id: Option<TrackId>,
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramCycleResponse {
    pub id: ProgramCycleId,
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProgramCycleStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub track: Option<TrackRef>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<ContextRef>,
}

impl From<&ProgramCycle> for ProgramCycleResponse {
    fn from(cycle: &ProgramCycle) -> Self {
        Self {
            id: cycle.id(),
            track_id: cycle.track_id(),
            context_id: cycle.context_id(),
            name: cycle.name().to_string(),
            description: cycle.description().map(str::to_string),
            status: cycle.status(),
            start_date: cycle.start_date(),
            end_date: cycle.end_date(),
            created_at: *cycle.created_at().as_datetime(),
            updated_at: *cycle.updated_at().as_datetime(),
            track: None,
            context: None,
        }
    }
}

impl From<ProgramCycleDetails> for ProgramCycleResponse {
    fn from(details: ProgramCycleDetails) -> Self {
        Self {
            track: Some(details.track),
            context: Some(details.context),
            ..Self::from(&details.cycle)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramCycleListResponse {
    pub program_cycles: Vec<ProgramCycleResponse>,
}
