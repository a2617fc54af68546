use crate::error::StepError;
use crate::route::RouteTable;
use serde::{Deserialize, Serialize};

/// Where a jump should land: a step index or a URL resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepTarget {
    Index(usize),
    Url(String),
}

impl From<usize> for StepTarget {
    fn from(index: usize) -> Self {
        StepTarget::Index(index)
    }
}

impl From<&str> for StepTarget {
    fn from(url: &str) -> Self {
        StepTarget::Url(url.to_string())
    }
}

impl From<String> for StepTarget {
    fn from(url: String) -> Self {
        StepTarget::Url(url)
    }
}

/// The explicit navigation request of a wizard step.
///
/// `Navigation` represents "Control Flow as Data": instead of computing a
/// redirect inline, a step names where it wants to go and the route table
/// resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    /// Advance to the following route
    Next,

    /// Return to the preceding route
    Prev,

    /// Go to an arbitrary step, independent of the current URL
    Jump(StepTarget),
}

/// A resolved navigation: the destination index and its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub index: usize,
    pub route: &'a str,
}

impl Navigation {
    /// Resolve against `routes`, using `current_url` for relative moves.
    ///
    /// `Jump` ignores `current_url` entirely.
    pub fn resolve<'a>(
        &self,
        routes: &'a RouteTable,
        current_url: &str,
    ) -> Result<Resolved<'a>, StepError> {
        let index = match self {
            Navigation::Next => {
                let current = routes.step_for_url(current_url)?;
                if routes.is_last(current) {
                    return Err(StepError::NoNextStep { current });
                }
                current + 1
            }
            Navigation::Prev => {
                let current = routes.step_for_url(current_url)?;
                if routes.is_first(current) {
                    return Err(StepError::NoPreviousStep);
                }
                current - 1
            }
            Navigation::Jump(StepTarget::Index(index)) => *index,
            Navigation::Jump(StepTarget::Url(url)) => routes.step_for_url(url)?,
        };

        Ok(Resolved {
            index,
            route: routes.route_at(index)?,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Navigation::Next => "next",
            Navigation::Prev => "prev",
            Navigation::Jump(_) => "jump",
        }
    }
}
