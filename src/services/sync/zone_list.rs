//! 分区列表推断
//!
//! 评估的 options 有多种历史写法，按以下顺序取第一个匹配的字段：
//! `zones` → `questionGroups` → `questions` → `qids`。都不匹配时视为配置错误。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Result, SyncError};
use crate::models::disk::{DiskZone, QuestionEntry};
use crate::utils::flatten_deep;

/// 分区列表来自 options 中的哪个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSource {
    Zones,
    QuestionGroups,
    Questions,
    Qids,
}

impl ZoneSource {
    pub fn key(&self) -> &'static str {
        match self {
            ZoneSource::Zones => "zones",
            ZoneSource::QuestionGroups => "questionGroups",
            ZoneSource::Questions => "questions",
            ZoneSource::Qids => "qids",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneList {
    pub source: ZoneSource,
    pub zones: Vec<DiskZone>,
}

pub fn derive_zone_list(options: Option<&Value>) -> Result<ZoneList> {
    let options = options
        .ok_or_else(|| SyncError::configuration("assessment has no options; cannot determine zones"))?;

    if let Some(zones) = options.get(ZoneSource::Zones.key()) {
        let zones: Vec<DiskZone> = parse(ZoneSource::Zones, zones)?;
        return Ok(ZoneList {
            source: ZoneSource::Zones,
            zones,
        });
    }

    if let Some(groups) = options.get(ZoneSource::QuestionGroups.key()) {
        let questions = flatten_deep(groups)
            .into_iter()
            .map(|entry| parse::<QuestionEntry>(ZoneSource::QuestionGroups, &entry))
            .collect::<Result<Vec<_>>>()?;
        return Ok(single_zone(ZoneSource::QuestionGroups, questions));
    }

    if let Some(questions) = options.get(ZoneSource::Questions.key()) {
        let questions: Vec<QuestionEntry> = parse(ZoneSource::Questions, questions)?;
        return Ok(single_zone(ZoneSource::Questions, questions));
    }

    if let Some(qids) = options.get(ZoneSource::Qids.key()) {
        let qids: Vec<String> = parse(ZoneSource::Qids, qids)?;
        let questions = qids.into_iter().map(QuestionEntry::Qid).collect();
        return Ok(single_zone(ZoneSource::Qids, questions));
    }

    Err(SyncError::configuration(
        "assessment options define none of zones, questionGroups, questions, qids",
    ))
}

fn single_zone(source: ZoneSource, questions: Vec<QuestionEntry>) -> ZoneList {
    ZoneList {
        source,
        zones: vec![DiskZone {
            title: None,
            questions,
        }],
    }
}

fn parse<T: DeserializeOwned>(source: ZoneSource, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| SyncError::configuration(format!("invalid options.{}: {e}", source.key())))
}
