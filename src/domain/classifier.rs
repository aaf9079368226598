//! Missed-call classification
//!
//! Decides whether a telephony session event is worth a CRM call-log entry.
//! Rules are checked in order and the first match wins:
//!
//! 1. the first party carries `missedCall: true` -> `Missed`
//! 2. inbound leg with status `Disconnected` -> `Disconnected` (dropped before answer)
//! 3. status `VoiceMail` -> `Voicemail`
//!
//! Anything else is not a CRM event. Missing fields never fail; they only
//! make a rule not match.

use super::crm::{ClassifiedCrmEvent, CrmEventKind};
use super::telephony::{Party, PartyDirection, PartyStatusCode, TelephonySessionEvent};

/// Classify one notification body. Pure and total.
pub fn classify(event: &TelephonySessionEvent) -> Option<ClassifiedCrmEvent> {
    let party = event.first_party()?;
    let kind = classify_party(party)?;

    Some(ClassifiedCrmEvent {
        event: kind,
        direction: party.direction.clone(),
        from: party.from_number().map(str::to_string),
        to: party.to_number().map(str::to_string),
        telephony_session_id: event.telephony_session_id.clone(),
        sequence: event.sequence,
        end_time: event.event_time.clone(),
    })
}

fn classify_party(party: &Party) -> Option<CrmEventKind> {
    if party.missed_call == Some(true) {
        return Some(CrmEventKind::Missed);
    }

    let code = party.status_code();
    let inbound = party.direction == Some(PartyDirection::Inbound);

    match code {
        Some(PartyStatusCode::Disconnected) if inbound => Some(CrmEventKind::Disconnected),
        Some(PartyStatusCode::VoiceMail) => Some(CrmEventKind::Voicemail),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telephony::{PartyEndpoint, PartyStatus};

    fn party(
        direction: Option<PartyDirection>,
        code: Option<PartyStatusCode>,
        missed_call: Option<bool>,
    ) -> Party {
        Party {
            direction,
            status: code.map(|code| PartyStatus {
                code: Some(code),
                reason: None,
            }),
            missed_call,
            from: Some(PartyEndpoint {
                phone_number: Some("+1555".to_string()),
                ..Default::default()
            }),
            to: Some(PartyEndpoint {
                phone_number: Some("+1999".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn event_with(parties: Vec<Party>) -> TelephonySessionEvent {
        TelephonySessionEvent {
            telephony_session_id: Some("s1".to_string()),
            sequence: Some(3),
            event_time: Some("T1".to_string()),
            parties: Some(parties),
            ..Default::default()
        }
    }

    fn kind_of(p: Party) -> Option<CrmEventKind> {
        classify(&event_with(vec![p])).map(|e| e.event)
    }

    const DIRECTIONS: [Option<PartyDirection>; 3] =
        [Some(PartyDirection::Inbound), Some(PartyDirection::Outbound), None];

    fn all_codes() -> Vec<Option<PartyStatusCode>> {
        vec![
            Some(PartyStatusCode::Setup),
            Some(PartyStatusCode::Proceeding),
            Some(PartyStatusCode::Answered),
            Some(PartyStatusCode::Disconnected),
            Some(PartyStatusCode::Gone),
            Some(PartyStatusCode::VoiceMail),
            Some(PartyStatusCode::Other("Mystery".to_string())),
            None,
        ]
    }

    #[test]
    fn test_missed_call_flag_always_wins() {
        for direction in DIRECTIONS.iter() {
            for code in all_codes() {
                assert_eq!(
                    kind_of(party(direction.clone(), code.clone(), Some(true))),
                    Some(CrmEventKind::Missed),
                    "direction {:?}, code {:?}",
                    direction,
                    code
                );
            }
        }
    }

    #[test]
    fn test_inbound_disconnected_is_dropped_call() {
        for missed in [None, Some(false)] {
            assert_eq!(
                kind_of(party(
                    Some(PartyDirection::Inbound),
                    Some(PartyStatusCode::Disconnected),
                    missed
                )),
                Some(CrmEventKind::Disconnected)
            );
        }
    }

    #[test]
    fn test_outbound_disconnected_is_ignored() {
        assert_eq!(
            kind_of(party(
                Some(PartyDirection::Outbound),
                Some(PartyStatusCode::Disconnected),
                None
            )),
            None
        );
    }

    #[test]
    fn test_voicemail_any_direction() {
        for direction in DIRECTIONS.iter() {
            assert_eq!(
                kind_of(party(direction.clone(), Some(PartyStatusCode::VoiceMail), Some(false))),
                Some(CrmEventKind::Voicemail)
            );
        }
    }

    #[test]
    fn test_missed_beats_voicemail() {
        assert_eq!(
            kind_of(party(
                Some(PartyDirection::Inbound),
                Some(PartyStatusCode::VoiceMail),
                Some(true)
            )),
            Some(CrmEventKind::Missed)
        );
    }

    #[test]
    fn test_other_combinations_yield_nothing() {
        for direction in DIRECTIONS.iter() {
            for code in all_codes() {
                let inbound_disconnected = *direction == Some(PartyDirection::Inbound)
                    && code == Some(PartyStatusCode::Disconnected);
                if inbound_disconnected || code == Some(PartyStatusCode::VoiceMail) {
                    continue;
                }
                assert_eq!(kind_of(party(direction.clone(), code, Some(false))), None);
            }
        }
    }

    #[test]
    fn test_unknown_direction_is_not_inbound() {
        assert_eq!(
            kind_of(party(
                Some(PartyDirection::Other("inbound".to_string())),
                Some(PartyStatusCode::Disconnected),
                None
            )),
            None
        );
    }

    #[test]
    fn test_empty_and_missing_parties() {
        assert_eq!(classify(&event_with(vec![])), None);
        assert_eq!(classify(&TelephonySessionEvent::default()), None);
        assert_eq!(kind_of(Party::default()), None);
    }

    #[test]
    fn test_only_first_party_is_inspected() {
        let answered = party(Some(PartyDirection::Outbound), Some(PartyStatusCode::Answered), None);
        let missed = party(Some(PartyDirection::Inbound), None, Some(true));
        assert_eq!(classify(&event_with(vec![answered, missed])), None);
    }

    #[test]
    fn test_scenario_missed_call_record() {
        let event = event_with(vec![party(
            Some(PartyDirection::Inbound),
            Some(PartyStatusCode::Disconnected),
            Some(true),
        )]);

        let classified = classify(&event).unwrap();
        assert_eq!(
            classified,
            ClassifiedCrmEvent {
                event: CrmEventKind::Missed,
                direction: Some(PartyDirection::Inbound),
                from: Some("+1555".to_string()),
                to: Some("+1999".to_string()),
                telephony_session_id: Some("s1".to_string()),
                sequence: Some(3),
                end_time: Some("T1".to_string()),
            }
        );
    }

    #[test]
    fn test_scenario_answered_call_is_skipped() {
        let event = event_with(vec![party(
            Some(PartyDirection::Inbound),
            Some(PartyStatusCode::Answered),
            Some(false),
        )]);
        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_classify_is_pure() {
        let event = event_with(vec![party(
            Some(PartyDirection::Inbound),
            Some(PartyStatusCode::VoiceMail),
            None,
        )]);
        let before = event.clone();

        let first = classify(&event);
        let second = classify(&event);
        assert_eq!(first, second);
        assert_eq!(event, before);
    }
}
