/// Length of a single edge as given in the input, and the time a vehicle needs to
/// traverse it.
pub type Length = u32;

/// Cumulative distance along paths and vehicle clocks. Wide enough that summing any
/// number of edge lengths cannot overflow in practice.
pub type Distance = u64;

/// Weight of a shipment and capacity of a vehicle.
pub type Weight = u32;
