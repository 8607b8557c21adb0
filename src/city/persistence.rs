//! Settlement persistence - fixed-order binary layout and JSON form
//!
//! Binary format (all integers little-endian):
//! - i32: reveal radius
//! - i32: observation radius
//! - u8: town type (faction)
//! - u8: owning player
//! - u32 count (<= 32) + u32 ids: available buildings
//! - u32 count (<= 32) + u32 ids: built buildings
//! - u8: has built today
//! - u32 count + u32 ids: allowed spells
//! - u32 count + u32 ids: mage guild spells
//! - u8: has researched today
//! - u32 length + UTF-8 bytes: name (<= 32), title (<= 32),
//!   description (<= 256), history (<= 256)
//! - u32 count + (u32 unit, u32 count) pairs: available troops
//! - u8: reserved garrison hero index (always 0)
//! - 5 x (u32 unit, u32 count): garrison slots
//! - u8: icon
//! - i32: town id
//!
//! The JSON form carries the same fields by name with enums as symbolic
//! names. Hero associations are not restored from either form.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::city::settlement::{Settlement, TroopStack, GARRISON_SLOTS};
use crate::core::error::{Result, TownError};
use crate::core::types::{BuildingId, Faction, PlayerColor, SpellId, UnitId};

pub const MAX_BUILDING_LIST: usize = 32;
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_TITLE_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 256;
pub const MAX_HISTORY_LEN: usize = 256;

/// Persisted form of a settlement, fields in wire order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub reveal_radius: i32,
    pub observation_radius: i32,
    pub town_type: Faction,
    pub owner: PlayerColor,
    pub available_buildings: Vec<BuildingId>,
    pub built_buildings: Vec<BuildingId>,
    pub has_built_today: bool,
    pub allowed_spells: Vec<SpellId>,
    pub mage_guild_spells: Vec<SpellId>,
    pub has_researched_today: bool,
    pub name: String,
    pub title: String,
    pub description: String,
    pub history: String,
    pub available_troops: Vec<TroopStack>,
    pub garrison_hero_index: u8,
    pub garrison: [TroopStack; GARRISON_SLOTS],
    pub icon: u8,
    pub town_id: i32,
}

impl From<&Settlement> for SettlementRecord {
    fn from(s: &Settlement) -> Self {
        Self {
            reveal_radius: s.reveal_radius,
            observation_radius: s.observation_radius,
            town_type: s.faction,
            owner: s.owner,
            available_buildings: s.available.iter().copied().collect(),
            built_buildings: s.built.iter().copied().collect(),
            has_built_today: s.has_acted_today,
            allowed_spells: s.allowed_spells.clone(),
            mage_guild_spells: s.mage_guild_spells.clone(),
            has_researched_today: s.has_researched_today,
            name: s.name.clone(),
            title: s.title.clone(),
            description: s.description.clone(),
            history: s.history.clone(),
            available_troops: s.available_troops.clone(),
            garrison_hero_index: 0,
            garrison: s.garrison,
            icon: s.icon,
            town_id: s.town_id,
        }
    }
}

impl SettlementRecord {
    /// Rebuild a settlement; hero handles start detached
    pub fn into_settlement(self) -> Settlement {
        let mut s = Settlement::new(self.town_id, self.town_type, self.owner);
        s.reveal_radius = self.reveal_radius;
        s.observation_radius = self.observation_radius;
        s.available = self.available_buildings.into_iter().collect();
        s.built = self.built_buildings.into_iter().collect();
        s.has_acted_today = self.has_built_today;
        s.allowed_spells = self.allowed_spells;
        s.mage_guild_spells = self.mage_guild_spells;
        s.has_researched_today = self.has_researched_today;
        s.name = self.name;
        s.title = self.title;
        s.description = self.description;
        s.history = self.history;
        s.available_troops = self.available_troops;
        s.garrison = self.garrison;
        s.icon = self.icon;
        s
    }

    /// Check every bounded field
    pub fn validate(&self) -> Result<()> {
        check_len("available_buildings", self.available_buildings.len(), MAX_BUILDING_LIST)?;
        check_len("built_buildings", self.built_buildings.len(), MAX_BUILDING_LIST)?;
        check_len("name", self.name.len(), MAX_NAME_LEN)?;
        check_len("title", self.title.len(), MAX_TITLE_LEN)?;
        check_len("description", self.description.len(), MAX_DESCRIPTION_LEN)?;
        check_len("history", self.history.len(), MAX_HISTORY_LEN)?;
        Ok(())
    }

    // === BINARY ===

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let mut w = ByteWriter::default();

        w.i32(self.reveal_radius);
        w.i32(self.observation_radius);
        w.u8(self.town_type as u8);
        w.u8(self.owner as u8);
        w.ids(self.available_buildings.iter().map(|b| b.0));
        w.ids(self.built_buildings.iter().map(|b| b.0));
        w.bool(self.has_built_today);
        w.ids(self.allowed_spells.iter().map(|s| s.0));
        w.ids(self.mage_guild_spells.iter().map(|s| s.0));
        w.bool(self.has_researched_today);
        w.string(&self.name);
        w.string(&self.title);
        w.string(&self.description);
        w.string(&self.history);
        w.length(self.available_troops.len());
        for stack in &self.available_troops {
            w.troop(stack);
        }
        w.u8(self.garrison_hero_index);
        for slot in &self.garrison {
            w.troop(slot);
        }
        w.u8(self.icon);
        w.i32(self.town_id);

        Ok(w.buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(bytes);

        let reveal_radius = r.i32("reveal_radius")?;
        let observation_radius = r.i32("observation_radius")?;
        let raw = r.u8("town_type")?;
        let town_type = Faction::from_u8(raw).ok_or(TownError::InvalidEnum {
            field: "town_type",
            value: raw,
        })?;
        let raw = r.u8("owner")?;
        let owner = PlayerColor::from_u8(raw).ok_or(TownError::InvalidEnum {
            field: "owner",
            value: raw,
        })?;
        let available_buildings = r.ids("available_buildings", Some(MAX_BUILDING_LIST))?
            .into_iter()
            .map(BuildingId)
            .collect();
        let built_buildings = r.ids("built_buildings", Some(MAX_BUILDING_LIST))?
            .into_iter()
            .map(BuildingId)
            .collect();
        let has_built_today = r.bool("has_built_today")?;
        let allowed_spells = r.ids("allowed_spells", None)?.into_iter().map(SpellId).collect();
        let mage_guild_spells = r.ids("mage_guild_spells", None)?.into_iter().map(SpellId).collect();
        let has_researched_today = r.bool("has_researched_today")?;
        let name = r.string("name", MAX_NAME_LEN)?;
        let title = r.string("title", MAX_TITLE_LEN)?;
        let description = r.string("description", MAX_DESCRIPTION_LEN)?;
        let history = r.string("history", MAX_HISTORY_LEN)?;

        let count = r.count("available_troops", None, 8)?;
        let mut available_troops = Vec::with_capacity(count);
        for _ in 0..count {
            available_troops.push(r.troop("available_troops")?);
        }

        let garrison_hero_index = r.u8("garrison_hero_index")?;
        let mut garrison = [TroopStack::default(); GARRISON_SLOTS];
        for slot in garrison.iter_mut() {
            *slot = r.troop("garrison")?;
        }
        let icon = r.u8("icon")?;
        let town_id = r.i32("town_id")?;

        if r.remaining() > 0 {
            return Err(TownError::TrailingBytes(r.remaining()));
        }

        Ok(Self {
            reveal_radius,
            observation_radius,
            town_type,
            owner,
            available_buildings,
            built_buildings,
            has_built_today,
            allowed_spells,
            mage_guild_spells,
            has_researched_today,
            name,
            title,
            description,
            history,
            available_troops,
            garrison_hero_index,
            garrison,
            icon,
            town_id,
        })
    }

    /// Write the binary form to any sink
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(&self.encode()?)?;
        Ok(())
    }

    /// Read the binary form from any source
    pub fn read_from<R: Read>(mut source: R) -> Result<Self> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        Self::decode(&bytes)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_from(std::io::BufReader::new(file))
    }

    // === JSON ===

    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let record: SettlementRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(TownError::FieldTooLong { field, len, max });
    }
    Ok(())
}

#[derive(Default)]
struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn bool(&mut self, v: bool) {
        self.buf.push(v as u8);
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn length(&mut self, len: usize) {
        // Lengths are bounded by validate() or by u32 element counts in memory
        self.u32(len.min(u32::MAX as usize) as u32);
    }

    fn ids(&mut self, ids: impl ExactSizeIterator<Item = u32>) {
        self.length(ids.len());
        for id in ids {
            self.u32(id);
        }
    }

    fn string(&mut self, s: &str) {
        self.length(s.len());
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn troop(&mut self, stack: &TroopStack) {
        self.u32(stack.unit.0);
        self.u32(stack.count);
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(TownError::UnexpectedEof(field));
        }
        let bytes: &'a [u8] = self.bytes;
        let slice = &bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    fn bool(&mut self, field: &'static str) -> Result<bool> {
        match self.u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(TownError::InvalidEnum { field, value }),
        }
    }

    fn u32(&mut self, field: &'static str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(field)?))
    }

    fn i32(&mut self, field: &'static str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array(field)?))
    }

    /// Element count, checked against `max` and against the bytes left
    fn count(&mut self, field: &'static str, max: Option<usize>, elem_size: usize) -> Result<usize> {
        let len = self.u32(field)? as usize;
        if let Some(max) = max {
            check_len(field, len, max)?;
        }
        if len.saturating_mul(elem_size) > self.remaining() {
            return Err(TownError::UnexpectedEof(field));
        }
        Ok(len)
    }

    fn ids(&mut self, field: &'static str, max: Option<usize>) -> Result<Vec<u32>> {
        let count = self.count(field, max, 4)?;
        (0..count).map(|_| self.u32(field)).collect()
    }

    fn string(&mut self, field: &'static str, max: usize) -> Result<String> {
        let len = self.count(field, Some(max), 1)?;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| TownError::InvalidUtf8(field))
    }

    fn troop(&mut self, field: &'static str) -> Result<TroopStack> {
        let unit = UnitId(self.u32(field)?);
        let count = self.u32(field)?;
        Ok(TroopStack::new(unit, count))
    }
}
