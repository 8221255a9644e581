use steel::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive)]
pub enum GameInstruction {
    // Admin
    Initialize = 0,
    Configure = 1,

    // Miner
    Stake = 2,
    Resolve = 3,
    ClaimMining = 4,

    // Craps
    PlaceBet = 10,
    SettleCraps = 11,
    AdvanceTable = 12,
    ClaimWinnings = 13,
    FundHouse = 14,
    ForceSettle = 15,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Initialize {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Configure {
    pub admin: Pubkey,
    pub fee_collector: Pubkey,
    pub admin_fee_bps: [u8; 8],
    pub top_miner_bps: [u8; 8],
    pub dice_bonus_bps: [u8; 8],
    pub round_duration: [u8; 8],
    pub empty_pool_policy: u8,
    pub field_twelve_triple: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Stake {
    pub amount: [u8; 8],
    pub square: u8,
    /// Predicted dice sum (2..=12), or 0 for none.
    pub prediction: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Resolve {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ClaimMining {}

/// Bet kinds accepted by `PlaceBet`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum CrapsBetType {
    PassLine = 0,
    DontPass = 1,
    PassOdds = 2,
    DontPassOdds = 3,
    Come = 4,
    DontCome = 5,
    ComeOdds = 6,
    DontComeOdds = 7,
    Place = 8,
    Hardway = 9,
    Field = 10,
    AnySeven = 11,
    AnyCraps = 12,
    YoEleven = 13,
    Aces = 14,
    Twelve = 15,
    Fire = 16,
    Small = 17,
    Tall = 18,
    All = 19,
    RideTheLine = 20,
    MugsysCorner = 21,
    Yes = 26,
    No = 27,
    Next = 28,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PlaceBet {
    pub amount: [u8; 8],
    /// `CrapsBetType` discriminant.
    pub bet_type: u8,
    /// Point, hardway or sum the bet is on (0 when the kind takes none).
    pub target: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SettleCraps {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AdvanceTable {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ClaimWinnings {}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FundHouse {
    pub amount: [u8; 8],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ForceSettle {}

instruction!(GameInstruction, Initialize);
instruction!(GameInstruction, Configure);
instruction!(GameInstruction, Stake);
instruction!(GameInstruction, Resolve);
instruction!(GameInstruction, ClaimMining);
instruction!(GameInstruction, PlaceBet);
instruction!(GameInstruction, SettleCraps);
instruction!(GameInstruction, AdvanceTable);
instruction!(GameInstruction, ClaimWinnings);
instruction!(GameInstruction, FundHouse);
instruction!(GameInstruction, ForceSettle);
