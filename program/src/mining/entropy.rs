use rngcraps_api::prelude::*;

const ENTRY_LEN: usize = 40;

/// Where the seed slot stands in the SlotHashes history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedLookup {
    /// Hash of the first slot produced at or after the seed slot.
    Found([u8; 32]),
    /// No slot at or after the seed slot has been recorded yet.
    Pending,
    /// The history no longer reaches back to the seed slot.
    Expired,
}

/// Looks up the hash of the first slot at or after `seed_slot`.
///
/// `data` is the raw SlotHashes sysvar: a u64 entry count followed by
/// `(slot, hash)` entries, newest first. The answer only counts while an
/// older entry is still retained; otherwise the first slot can't be told
/// apart from a later one.
pub fn find_slot_hash(data: &[u8], seed_slot: u64) -> Result<SeedLookup, GameError> {
    let count = data
        .get(0..8)
        .and_then(|b| b.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or(GameError::EntropyUnavailable)? as usize;

    let mut candidate = None;
    for i in 0..count {
        let offset = 8 + i * ENTRY_LEN;
        let entry = data
            .get(offset..offset + ENTRY_LEN)
            .ok_or(GameError::EntropyUnavailable)?;
        let slot = u64::from_le_bytes(
            entry[0..8]
                .try_into()
                .map_err(|_| GameError::EntropyUnavailable)?,
        );
        if slot < seed_slot {
            return Ok(match candidate {
                Some(hash) => SeedLookup::Found(hash),
                None => SeedLookup::Pending,
            });
        }
        let hash: [u8; 32] = entry[8..40]
            .try_into()
            .map_err(|_| GameError::EntropyUnavailable)?;
        candidate = Some(hash);
    }

    match candidate {
        Some(_) => Ok(SeedLookup::Expired),
        None => Ok(SeedLookup::Pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sysvar(entries: &[(u64, u8)]) -> Vec<u8> {
        let mut data = (entries.len() as u64).to_le_bytes().to_vec();
        for (slot, fill) in entries {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(&[*fill; 32]);
        }
        data
    }

    #[test]
    fn test_first_slot_at_or_after() {
        let data = sysvar(&[(110, 0xaa), (109, 0xbb), (107, 0xcc), (105, 0xdd)]);
        assert_eq!(find_slot_hash(&data, 107), Ok(SeedLookup::Found([0xcc; 32])));
        assert_eq!(find_slot_hash(&data, 106), Ok(SeedLookup::Found([0xcc; 32])));
        assert_eq!(find_slot_hash(&data, 110), Ok(SeedLookup::Found([0xaa; 32])));
    }

    #[test]
    fn test_not_yet_available() {
        let data = sysvar(&[(110, 0xaa), (109, 0xbb)]);
        assert_eq!(find_slot_hash(&data, 111), Ok(SeedLookup::Pending));
        assert_eq!(find_slot_hash(&sysvar(&[]), 1), Ok(SeedLookup::Pending));
        assert_eq!(find_slot_hash(&[], 1), Err(GameError::EntropyUnavailable));
    }

    #[test]
    fn test_aged_out_seed_is_not_used() {
        // Slot 100 and everything before it have left the history.
        let later = sysvar(&[(601, 0x01), (600, 0x02), (101, 0x03)]);
        let latest = sysvar(&[(602, 0x04), (601, 0x01), (600, 0x02)]);
        assert_eq!(find_slot_hash(&later, 100), Ok(SeedLookup::Expired));
        assert_eq!(find_slot_hash(&latest, 100), Ok(SeedLookup::Expired));
        assert_eq!(find_slot_hash(&later, 101), Ok(SeedLookup::Expired));

        // The same slot still resolves while its predecessor is retained.
        let retained = sysvar(&[(601, 0x01), (101, 0x03), (99, 0x05)]);
        assert_eq!(find_slot_hash(&retained, 100), Ok(SeedLookup::Found([0x03; 32])));
    }

    #[test]
    fn test_truncated_data() {
        let mut data = sysvar(&[(110, 0xaa), (109, 0xbb)]);
        data.truncate(8 + ENTRY_LEN + 10);
        assert_eq!(find_slot_hash(&data, 100), Err(GameError::EntropyUnavailable));
    }
}
