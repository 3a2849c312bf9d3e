use midly::{
    num::{u4, u7},
    TrackEventKind,
};
use std::collections::BTreeMap;

/// A note-on strike with its sounding parameters.
///
/// Strikes are plain values; rewrite passes produce updated copies instead of
/// mutating shared message objects, so duplicating an event (e.g. for a flam)
/// can never alias another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub channel: u4,
    pub key: u7,
    pub vel: u7,
}

/// What an event carries: either a strike, or any other retained container
/// message (tempo, program change, track name, ...) passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    Note(Strike),
    Other(TrackEventKind<'a>),
}

/// One musical instruction at an absolute tick, tagged with the output track
/// it is currently destined for. Never represents a note-off; note-offs only
/// exist again once the timeline synthesizer generates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a> {
    pub tick: u32,
    pub track: usize,
    pub payload: Payload<'a>,
}

impl<'a> Event<'a> {
    pub fn note(tick: u32, track: usize, channel: u8, key: u8, vel: u8) -> Self {
        Event {
            tick,
            track,
            payload: Payload::Note(Strike {
                channel: channel.into(),
                key: key.into(),
                vel: vel.into(),
            }),
        }
    }

    pub fn strike(&self) -> Option<Strike> {
        match self.payload {
            Payload::Note(strike) => Some(strike),
            Payload::Other(_) => None,
        }
    }

    pub fn strike_mut(&mut self) -> Option<&mut Strike> {
        match self.payload {
            Payload::Note(ref mut strike) => Some(strike),
            Payload::Other(_) => None,
        }
    }
}

/// The tick-indexed event timeline all rewrite passes operate on.
///
/// Buckets are kept in a `BTreeMap` so iteration is always in ascending tick
/// order; within one tick, events keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable<'a> {
    buckets: BTreeMap<u32, Vec<Event<'a>>>,
}

impl<'a> EventTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: Event<'a>) {
        self.buckets.entry(event.tick).or_default().push(event);
    }

    /// Total number of events across all ticks.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// All events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &Event<'a>> {
        self.buckets.values().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Event<'a>> {
        self.buckets.values_mut().flatten()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (u32, &Vec<Event<'a>>)> {
        self.buckets.iter().map(|(&tick, events)| (tick, events))
    }

    pub fn buckets_mut(&mut self) -> impl Iterator<Item = (u32, &mut Vec<Event<'a>>)> {
        self.buckets.iter_mut().map(|(&tick, events)| (tick, events))
    }

    pub fn bucket_mut(&mut self, tick: u32) -> Option<&mut Vec<Event<'a>>> {
        self.buckets.get_mut(&tick)
    }
}
