use crate::core::mission::{MissionDerived, MissionRawInput};
use crate::derivation::distribution::distribute;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Run the full financial cascade over a mission's raw inputs.
///
/// Pure and deterministic: identical inputs (including allocation
/// order) produce an identical derived block. The engine never
/// validates, clamps or errors — percentages outside [0, 100] and
/// negative amounts propagate arithmetically, and a negative final
/// reliquat is the intended over-allocation signal.
///
/// # Algorithm
///
/// Strict order, each step feeding the next:
///
/// 1. `montant_sub = ca_genere * pct_sub / 100`
/// 2. `montant_client_apercu = ca_genere * pct_client / 100`
///    (preview; the persisted client share starts at zero and only
///    moves on the unpaid→paid transition)
/// 3. `base_distribuable = montant_sub - reduction_base`
///    (the base is taken from the subsidy portion, not total CA)
/// 4. `total_frais` = sum of the five fee fields
/// 5. `restant_apres_frais = base_distribuable - total_frais`
/// 6. `restant_apres_apporteur = restant_apres_frais - commission_apporteur`
/// 7. each collaborator gets `restant_apres_apporteur * pct / 100`
/// 8. `reliquat_final` = what step 7 left of `restant_apres_apporteur`
///
/// # Examples
///
/// ```
/// use cascade_engine::core::ids::ClientId;
/// use cascade_engine::core::mission::{Allocation, Frais, MissionRawInput};
/// use cascade_engine::core::period::Month;
/// use cascade_engine::derivation::cascade::derive_mission;
/// use rust_decimal_macros::dec;
///
/// let raw = MissionRawInput {
///     client: ClientId::new("acme"),
///     apporteur: None,
///     nom_mission: "Audit".into(),
///     mois: Month::Janvier,
///     annee: 2025,
///     ca_genere: dec!(10000),
///     pct_sub: dec!(50),
///     pct_client: dec!(30),
///     reduction_base: dec!(0),
///     frais: Frais::default(),
///     commission_apporteur: dec!(0),
///     pct_reliquat: dec!(0),
///     allocations: vec![
///         Allocation::new("fred", dec!(30)),
///         Allocation::new("eric", dec!(20)),
///     ],
/// };
///
/// let derived = derive_mission(&raw);
/// assert_eq!(derived.montant_sub, dec!(5000));
/// assert_eq!(derived.reliquat_final, dec!(2500));
/// ```
pub fn derive_mission(raw: &MissionRawInput) -> MissionDerived {
    let montant_sub = raw.ca_genere * raw.pct_sub / dec!(100);
    let montant_client_apercu = raw.ca_genere * raw.pct_client / dec!(100);
    let base_distribuable = montant_sub - raw.reduction_base;
    let total_frais = raw.frais.total();
    let restant_apres_frais = base_distribuable - total_frais;
    let restant_apres_apporteur = restant_apres_frais - raw.commission_apporteur;

    let distribution = distribute(restant_apres_apporteur, &raw.allocations);

    MissionDerived {
        montant_sub,
        montant_client_apercu,
        montant_client: Decimal::ZERO,
        base_distribuable,
        total_frais,
        restant_apres_frais,
        restant_apres_apporteur,
        parts_collaborateurs: distribution.parts,
        reliquat_final: distribution.residual,
    }
}
