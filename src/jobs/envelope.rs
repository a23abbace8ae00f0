use anyhow::Result;
use std::ops::Range;

use crate::compare::{Collection, DiffMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Collection,
    Diff,
    Highlight,
}

/// Names a submitted job so a failed run can still be reported under the right kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTag {
    Collection,
    Diff { generation: u64 },
    #[allow(dead_code)]
    Highlight,
}

impl JobTag {
    pub fn kind(&self) -> ResultKind {
        match self {
            JobTag::Collection => ResultKind::Collection,
            JobTag::Diff { .. } => ResultKind::Diff,
            JobTag::Highlight => ResultKind::Highlight,
        }
    }
}

/// Style spans for one file, one entry per line.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct HighlightData {
    pub key: String,
    pub lines: Vec<Vec<Range<usize>>>,
}

/// The single result a background job delivers to the UI thread.
#[derive(Debug)]
pub enum Envelope {
    Collection(Result<Collection>),
    Diff {
        generation: u64,
        result: Result<DiffMap>,
    },
    #[allow(dead_code)]
    Highlight(Result<HighlightData>),
}

impl Envelope {
    pub fn failed(tag: JobTag, err: anyhow::Error) -> Self {
        match tag {
            JobTag::Collection => Envelope::Collection(Err(err)),
            JobTag::Diff { generation } => Envelope::Diff {
                generation,
                result: Err(err),
            },
            JobTag::Highlight => Envelope::Highlight(Err(err)),
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            Envelope::Collection(_) => ResultKind::Collection,
            Envelope::Diff { .. } => ResultKind::Diff,
            Envelope::Highlight(_) => ResultKind::Highlight,
        }
    }

    pub fn is_err(&self) -> bool {
        match self {
            Envelope::Collection(r) => r.is_err(),
            Envelope::Diff { result, .. } => result.is_err(),
            Envelope::Highlight(r) => r.is_err(),
        }
    }
}
