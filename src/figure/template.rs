//! Move templates: the compact strings that describe how a figure may move.
//!
//! Each character is one step code. Directions are written as seen by a figure
//! facing north and are rotated by the figure's facing when the template is
//! walked.
//!
//! | code | meaning                                                       |
//! |------|---------------------------------------------------------------|
//! | `n` `e` `s` `w` | one step in that direction                         |
//! | `j`  | jump: the next positional step ignores occupancy              |
//! | `x`  | beat: the next positional step must land on a capturable figure |
//! | `/`  | slope: the next two steps form one atomic (diagonal) step     |
//! | `t`  | teleport: reserved, rejected when walked                      |
//!
//! Whitespace is ignored, so `"e xe"` and `"exe"` are the same template.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::board::Direction;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("move template is empty")]
    Empty,
    #[error("invalid step code {code:?} in move template {template:?}")]
    InvalidCode { code: char, template: String },
    #[error("modifier {code:?} at the end of move template {template:?} has no step to apply to")]
    DanglingModifier { code: char, template: String },
    #[error("slope in move template {template:?} must be followed by two plain steps")]
    IncompleteSlope { template: String },
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StepCode {
    Step(Direction),
    Jump,
    Beat,
    Slope,
    Teleport,
}

impl StepCode {
    pub fn from_code(code: char) -> Option<StepCode> {
        match code {
            'j' => Some(StepCode::Jump),
            'x' => Some(StepCode::Beat),
            '/' => Some(StepCode::Slope),
            't' => Some(StepCode::Teleport),
            c => Direction::from_code(c).map(StepCode::Step),
        }
    }

    pub fn code(&self) -> char {
        match self {
            StepCode::Step(direction) => direction.code(),
            StepCode::Jump => 'j',
            StepCode::Beat => 'x',
            StepCode::Slope => '/',
            StepCode::Teleport => 't',
        }
    }

    /// Jump, beat and slope qualify the step that follows them.
    pub fn is_modifier(&self) -> bool {
        matches!(self, StepCode::Jump | StepCode::Beat | StepCode::Slope)
    }
}

/// An immutable, cheaply clonable sequence of step codes.
///
/// Clones share the underlying steps, so a board clone copies figures without
/// copying their templates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MoveTemplate {
    steps: Arc<[StepCode]>,
}

impl MoveTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let steps = template
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                StepCode::from_code(c).ok_or_else(|| TemplateError::InvalidCode {
                    code: c,
                    template: template.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_steps(steps)
    }

    pub fn from_steps(steps: Vec<StepCode>) -> Result<Self, TemplateError> {
        validate(&steps)?;
        Ok(Self {
            steps: steps.into(),
        })
    }

    pub fn steps(&self) -> &[StepCode] {
        &self.steps
    }

    pub fn code(&self) -> String {
        self.steps.iter().map(StepCode::code).collect()
    }
}

fn validate(steps: &[StepCode]) -> Result<(), TemplateError> {
    if steps.is_empty() {
        return Err(TemplateError::Empty);
    }
    let template = || steps.iter().map(StepCode::code).collect::<String>();

    let mut index = 0;
    while index < steps.len() {
        if steps[index] == StepCode::Slope {
            let plain = |i: usize| matches!(steps.get(i), Some(StepCode::Step(_)));
            if !(plain(index + 1) && plain(index + 2)) {
                return Err(TemplateError::IncompleteSlope {
                    template: template(),
                });
            }
            index += 3;
            continue;
        }
        index += 1;
    }

    if let Some(last) = steps.last() {
        if last.is_modifier() {
            return Err(TemplateError::DanglingModifier {
                code: last.code(),
                template: template(),
            });
        }
    }
    Ok(())
}

impl FromStr for MoveTemplate {
    type Err = TemplateError;
    fn from_str(template: &str) -> Result<Self, Self::Err> {
        MoveTemplate::parse(template)
    }
}

impl fmt::Display for MoveTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Debug for MoveTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveTemplate({:?})", self.code())
    }
}
