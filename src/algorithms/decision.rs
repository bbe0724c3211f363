//! Threshold-tree evaluator and the fixed decision tables.
//!
//! Each algorithm is a small binary tree: branches test one remapped
//! item against a threshold, leaves carry the final score. The trees
//! are plain statics so the scoring policy can be inspected and tested
//! directly.

use super::mapping::{codes, RemappedItems};
use super::AlgorithmError;

#[derive(Debug, Clone, Copy)]
pub enum DecisionNode {
    /// Terminal score.
    Leaf(i32),
    /// Continue left when `item >= at_least`, right otherwise.
    Branch {
        item: &'static str,
        at_least: i32,
        then_branch: &'static DecisionNode,
        else_branch: &'static DecisionNode,
    },
}

impl DecisionNode {
    pub fn evaluate(&self, items: &RemappedItems) -> Result<i32, AlgorithmError> {
        match *self {
            DecisionNode::Leaf(score) => Ok(score),
            DecisionNode::Branch {
                item,
                at_least,
                then_branch,
                else_branch,
            } => {
                let value = items
                    .get(item)
                    .ok_or(AlgorithmError::MissingItem(item))?;
                if value >= at_least {
                    then_branch.evaluate(items)
                } else {
                    else_branch.evaluate(items)
                }
            }
        }
    }
}

/// 1 when the patient manages ADL, IADL and cognition without help.
pub static SELF_RELIANCE_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::ADL_HIERARCHY,
    at_least: 1,
    then_branch: &DecisionNode::Leaf(0),
    else_branch: &DecisionNode::Branch {
        item: codes::IADL_DIFFICULTY,
        at_least: 2,
        then_branch: &DecisionNode::Leaf(0),
        else_branch: &DecisionNode::Branch {
            item: codes::COGNITIVE_PERFORMANCE,
            at_least: 2,
            then_branch: &DecisionNode::Leaf(0),
            else_branch: &DecisionNode::Leaf(1),
        },
    },
};

/// How soon a full assessment should happen, 1 to 5.
pub static ASSESSMENT_URGENCY_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::SELF_RATED_HEALTH,
    at_least: 2,
    then_branch: &DecisionNode::Branch {
        item: codes::ADL_HIERARCHY,
        at_least: 3,
        then_branch: &DecisionNode::Leaf(5),
        else_branch: &DecisionNode::Leaf(4),
    },
    else_branch: &DecisionNode::Branch {
        item: codes::COGNITIVE_PERFORMANCE,
        at_least: 3,
        then_branch: &DecisionNode::Leaf(4),
        else_branch: &DecisionNode::Branch {
            item: codes::URGENT_REFERRAL,
            at_least: 1,
            then_branch: &DecisionNode::Leaf(3),
            else_branch: &DecisionNode::Branch {
                item: codes::FALLS,
                at_least: 2,
                then_branch: &DecisionNode::Leaf(3),
                else_branch: &DecisionNode::Branch {
                    item: codes::IADL_DIFFICULTY,
                    at_least: 3,
                    then_branch: &DecisionNode::Leaf(2),
                    else_branch: &DecisionNode::Leaf(1),
                },
            },
        },
    },
};

/// How soon services should start once assessed, 1 to 5.
pub static SERVICE_URGENCY_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::ADL_HIERARCHY,
    at_least: 4,
    then_branch: &DecisionNode::Leaf(5),
    else_branch: &DecisionNode::Branch {
        item: codes::ADL_HIERARCHY,
        at_least: 2,
        then_branch: &DecisionNode::Branch {
            item: codes::CAREGIVER_STRESS,
            at_least: 2,
            then_branch: &DecisionNode::Leaf(4),
            else_branch: &DecisionNode::Leaf(3),
        },
        else_branch: &DecisionNode::Branch {
            item: codes::CAREGIVER_STRESS,
            at_least: 2,
            then_branch: &DecisionNode::Leaf(2),
            else_branch: &DecisionNode::Leaf(1),
        },
    },
};

/// Rehabilitation potential, 0 to 5. Recent functional decline with
/// intact cognition scores highest.
pub static REHABILITATION_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::FUNCTION_DECLINE,
    at_least: 1,
    then_branch: &DecisionNode::Branch {
        item: codes::COGNITIVE_PERFORMANCE,
        at_least: 3,
        then_branch: &DecisionNode::Leaf(2),
        else_branch: &DecisionNode::Branch {
            item: codes::ADL_HIERARCHY,
            at_least: 3,
            then_branch: &DecisionNode::Leaf(5),
            else_branch: &DecisionNode::Branch {
                item: codes::ADL_HIERARCHY,
                at_least: 1,
                then_branch: &DecisionNode::Leaf(4),
                else_branch: &DecisionNode::Leaf(3),
            },
        },
    },
    else_branch: &DecisionNode::Branch {
        item: codes::FALLS,
        at_least: 1,
        then_branch: &DecisionNode::Leaf(1),
        else_branch: &DecisionNode::Leaf(0),
    },
};

/// Personal support need, 0 to 6, from combined ADL and IADL burden.
pub static PERSONAL_SUPPORT_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::ADL_HIERARCHY,
    at_least: 5,
    then_branch: &DecisionNode::Leaf(6),
    else_branch: &DecisionNode::Branch {
        item: codes::ADL_HIERARCHY,
        at_least: 3,
        then_branch: &DecisionNode::Branch {
            item: codes::IADL_DIFFICULTY,
            at_least: 3,
            then_branch: &DecisionNode::Leaf(5),
            else_branch: &DecisionNode::Leaf(4),
        },
        else_branch: &DecisionNode::Branch {
            item: codes::ADL_HIERARCHY,
            at_least: 1,
            then_branch: &DecisionNode::Branch {
                item: codes::IADL_DIFFICULTY,
                at_least: 2,
                then_branch: &DecisionNode::Leaf(3),
                else_branch: &DecisionNode::Leaf(2),
            },
            else_branch: &DecisionNode::Branch {
                item: codes::IADL_DIFFICULTY,
                at_least: 2,
                then_branch: &DecisionNode::Leaf(1),
                else_branch: &DecisionNode::Leaf(0),
            },
        },
    },
};

/// Distressed mood, 0 to 5, from symptom count and self-rated health.
pub static DISTRESSED_MOOD_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::MOOD_SYMPTOMS,
    at_least: 3,
    then_branch: &DecisionNode::Branch {
        item: codes::SELF_RATED_HEALTH,
        at_least: 2,
        then_branch: &DecisionNode::Leaf(5),
        else_branch: &DecisionNode::Leaf(4),
    },
    else_branch: &DecisionNode::Branch {
        item: codes::MOOD_SYMPTOMS,
        at_least: 2,
        then_branch: &DecisionNode::Leaf(3),
        else_branch: &DecisionNode::Branch {
            item: codes::MOOD_SYMPTOMS,
            at_least: 1,
            then_branch: &DecisionNode::Leaf(2),
            else_branch: &DecisionNode::Branch {
                item: codes::SELF_RATED_HEALTH,
                at_least: 3,
                then_branch: &DecisionNode::Leaf(1),
                else_branch: &DecisionNode::Leaf(0),
            },
        },
    },
};

/// Pain scale, 0 to 4, from frequency and intensity.
pub static PAIN_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::PAIN_FREQUENCY,
    at_least: 2,
    then_branch: &DecisionNode::Branch {
        item: codes::PAIN_INTENSITY,
        at_least: 3,
        then_branch: &DecisionNode::Leaf(4),
        else_branch: &DecisionNode::Branch {
            item: codes::PAIN_INTENSITY,
            at_least: 2,
            then_branch: &DecisionNode::Leaf(3),
            else_branch: &DecisionNode::Leaf(2),
        },
    },
    else_branch: &DecisionNode::Branch {
        item: codes::PAIN_FREQUENCY,
        at_least: 1,
        then_branch: &DecisionNode::Branch {
            item: codes::PAIN_INTENSITY,
            at_least: 2,
            then_branch: &DecisionNode::Leaf(2),
            else_branch: &DecisionNode::Leaf(1),
        },
        else_branch: &DecisionNode::Leaf(0),
    },
};

/// Health instability composite, 0 to 5, over the four indicator items.
pub static HEALTH_INSTABILITY_TREE: DecisionNode = DecisionNode::Branch {
    item: codes::DYSPNEA,
    at_least: 1,
    then_branch: &DecisionNode::Branch {
        item: codes::EDEMA,
        at_least: 1,
        then_branch: &DecisionNode::Branch {
            item: codes::WEIGHT_LOSS,
            at_least: 1,
            then_branch: &DecisionNode::Branch {
                item: codes::SELF_RATED_HEALTH,
                at_least: 2,
                then_branch: &DecisionNode::Leaf(5),
                else_branch: &DecisionNode::Leaf(4),
            },
            else_branch: &DecisionNode::Leaf(3),
        },
        else_branch: &DecisionNode::Branch {
            item: codes::WEIGHT_LOSS,
            at_least: 1,
            then_branch: &DecisionNode::Leaf(3),
            else_branch: &DecisionNode::Leaf(2),
        },
    },
    else_branch: &DecisionNode::Branch {
        item: codes::EDEMA,
        at_least: 1,
        then_branch: &DecisionNode::Branch {
            item: codes::WEIGHT_LOSS,
            at_least: 1,
            then_branch: &DecisionNode::Leaf(2),
            else_branch: &DecisionNode::Leaf(1),
        },
        else_branch: &DecisionNode::Branch {
            item: codes::WEIGHT_LOSS,
            at_least: 1,
            then_branch: &DecisionNode::Leaf(1),
            else_branch: &DecisionNode::Branch {
                item: codes::DEHYDRATION,
                at_least: 1,
                then_branch: &DecisionNode::Leaf(1),
                else_branch: &DecisionNode::Leaf(0),
            },
        },
    },
};
