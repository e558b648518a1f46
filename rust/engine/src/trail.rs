//! Integer codes for per-street action trails.
//!
//! A trail is the sequence of symbols appended after each action of a street:
//! `C` for a check, a call or a closing all-in, `B` for anything that puts
//! chips on top, `F` for a fold. The betting rules make the set of reachable
//! trails small and regular:
//!
//! * `""` before anyone acted, and `"F"` for an immediate pre-flop fold;
//! * an opener `X` (`C` or `B`), then `k` bets or raises: `X B^k`;
//! * optionally closed by `C`, or by `F` when the last symbol is a `B`.
//!
//! Codes enumerate that grammar by `(k, opener, closer)`, so every trail a
//! no-limit raise war can produce has one, however deep the stacks. `""` maps
//! to 0 and `"F"` to 1. Anything outside the grammar is a state-machine bug and
//! reported as [`GameError::UnknownActionTrail`].

use crate::errors::GameError;

const OPEN_CODES: u32 = 2;

/// Code of `trail`, or an error if the state machine could not produce it.
pub fn action_trail_code(trail: &str) -> Result<u32, GameError> {
    let unknown = || GameError::UnknownActionTrail(trail.to_string());
    match trail {
        "" => return Ok(0),
        "F" => return Ok(1),
        _ => {}
    }

    let bytes = trail.as_bytes();
    let opener = match bytes[0] {
        b'C' => 0,
        b'B' => 1,
        _ => return Err(unknown()),
    };
    let rest = &bytes[1..];
    let (raises, closer) = match rest.last() {
        Some(b'C') => (&rest[..rest.len() - 1], 1),
        Some(b'F') => (&rest[..rest.len() - 1], 2),
        _ => (rest, 0),
    };
    if raises.iter().any(|&b| b != b'B') {
        return Err(unknown());
    }
    // a fold needs something to fold to
    if closer == 2 && opener == 0 && raises.is_empty() {
        return Err(unknown());
    }

    let k = u32::try_from(raises.len()).map_err(|_| unknown())?;
    let slot = k
        .checked_mul(6)
        .and_then(|s| s.checked_add(3 * opener + closer))
        .ok_or_else(unknown)?;
    // slot 2 is the unreachable "CF"
    let code = if slot > 2 { slot - 1 } else { slot };
    code.checked_add(OPEN_CODES).ok_or_else(unknown)
}
