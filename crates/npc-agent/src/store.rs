//! Vehicle storage: `VehicleStore` (generational arena) and `VehicleRngs`
//! (per-vehicle RNG).
//!
//! # Layout
//!
//! The arena keeps parallel per-slot arrays: generation, agent record and
//! published pose.  A `VehicleId` is `(slot, generation)`; a slot freed by a
//! despawn is recycled with its generation bumped, so an old handle never
//! resolves to the newer vehicle.
//!
//! RNGs live in a separate `VehicleRngs` struct, indexed by the same slot, so
//! the pipeline can zip `&mut` agent records with `&mut` RNGs (sequentially
//! or under Rayon) without borrowing one struct twice:
//!
//! ```ignore
//! let (generations, agents, poses) = store.columns_mut();
//! agents.par_iter_mut()
//!     .zip(poses.par_iter_mut())
//!     .zip(rngs.as_mut_slice().par_iter_mut())
//!     .for_each(|((agent, pose), rng)| { /* one vehicle */ });
//! ```

use npc_core::{AgentRng, VehicleId};

use crate::{AgentError, AgentResult, Pose, VehicleAgent};

// ── VehicleRngs ───────────────────────────────────────────────────────────────

/// Per-slot deterministic RNG state, separated from [`VehicleStore`] for
/// split borrows.
///
/// Each slot's stream is reseeded from `(global_seed, VehicleId)` whenever a
/// vehicle is spawned into it.
pub struct VehicleRngs {
    seed: u64,
    inner: Vec<AgentRng>,
}

impl VehicleRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: Vec::new() }
    }

    /// Give `vehicle`'s slot a fresh stream, growing the array as needed.
    pub fn reseed(&mut self, vehicle: VehicleId) {
        let slot = vehicle.index();
        while self.inner.len() <= slot {
            let filler = VehicleId::new(self.inner.len() as u32, 0);
            self.inner.push(AgentRng::new(self.seed, filler));
        }
        self.inner[slot] = AgentRng::new(self.seed, vehicle);
    }

    /// Give every arena slot that has no stream yet one seeded from its
    /// current handle.  Covers vehicles spawned straight into the store.
    pub fn ensure_slots(&mut self, store: &VehicleStore) {
        for slot in self.inner.len()..store.slot_count() {
            self.inner.push(AgentRng::new(self.seed, store.id_at(slot)));
        }
    }

    #[inline]
    pub fn get_mut(&mut self, vehicle: VehicleId) -> Option<&mut AgentRng> {
        self.inner.get_mut(vehicle.index())
    }

    /// All slots, indexed like [`VehicleStore::columns_mut`].
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [AgentRng] {
        &mut self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── VehicleStore ──────────────────────────────────────────────────────────────

/// Generational arena of live vehicles.
#[derive(Default)]
pub struct VehicleStore {
    generations: Vec<u32>,
    agents: Vec<Option<VehicleAgent>>,
    poses: Vec<Pose>,
    free: Vec<u32>,
    live: usize,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(slots: usize) -> Self {
        Self {
            generations: Vec::with_capacity(slots),
            agents: Vec::with_capacity(slots),
            poses: Vec::with_capacity(slots),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of live vehicles.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated (live + free).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.agents.len()
    }

    /// Insert `agent`, reusing a free slot if one exists.  The published pose
    /// is initialised from the agent's control state.
    pub fn spawn(&mut self, agent: VehicleAgent) -> VehicleId {
        let pose = agent.pose();
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                let i = slot as usize;
                self.agents[i] = Some(agent);
                self.poses[i] = pose;
                VehicleId::new(slot, self.generations[i])
            }
            None => {
                let slot = self.agents.len() as u32;
                self.generations.push(0);
                self.agents.push(Some(agent));
                self.poses.push(pose);
                VehicleId::new(slot, 0)
            }
        }
    }

    /// Remove a live vehicle and return its final state.
    pub fn despawn(&mut self, id: VehicleId) -> AgentResult<VehicleAgent> {
        if !self.contains(id) {
            return Err(AgentError::StaleHandle(id));
        }
        let i = id.index();
        let agent = self.agents[i].take().ok_or(AgentError::StaleHandle(id))?;
        self.generations[i] = self.generations[i].wrapping_add(1);
        self.poses[i] = Pose::default();
        self.free.push(id.slot);
        self.live -= 1;
        Ok(agent)
    }

    /// `true` if `id` names a live vehicle.
    #[inline]
    pub fn contains(&self, id: VehicleId) -> bool {
        let i = id.index();
        i < self.agents.len() && self.generations[i] == id.generation && self.agents[i].is_some()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&VehicleAgent> {
        if !self.contains(id) {
            return None;
        }
        self.agents[id.index()].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut VehicleAgent> {
        if !self.contains(id) {
            return None;
        }
        self.agents[id.index()].as_mut()
    }

    /// Replace a live vehicle's record.
    pub fn set(&mut self, id: VehicleId, agent: VehicleAgent) -> AgentResult<()> {
        let slot = self.get_mut(id).ok_or(AgentError::StaleHandle(id))?;
        *slot = agent;
        Ok(())
    }

    #[inline]
    pub fn pose(&self, id: VehicleId) -> Option<&Pose> {
        if !self.contains(id) {
            return None;
        }
        self.poses.get(id.index())
    }

    pub fn set_pose(&mut self, id: VehicleId, pose: Pose) -> AgentResult<()> {
        if !self.contains(id) {
            return Err(AgentError::StaleHandle(id));
        }
        self.poses[id.index()] = pose;
        Ok(())
    }

    /// Handle of whatever occupies slot `slot`, live or not.
    #[inline]
    pub fn id_at(&self, slot: usize) -> VehicleId {
        VehicleId::new(slot as u32, self.generations[slot])
    }

    /// Live vehicle handles in ascending slot order.
    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_some())
            .map(|(i, _)| self.id_at(i))
    }

    /// Live vehicles in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &VehicleAgent)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_ref().map(|a| (self.id_at(i), a)))
    }

    /// Per-slot columns for the pipeline: generations (read-only), agent
    /// records and poses.  Empty slots are `None`.
    #[inline]
    pub fn columns_mut(&mut self) -> (&[u32], &mut [Option<VehicleAgent>], &mut [Pose]) {
        (&self.generations, &mut self.agents, &mut self.poses)
    }
}
