use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Negative signal distance means the signal was received before it
    /// was transmitted: bad measurement or bad orbital state upstream.
    #[error("physical non sense: rx prior tx")]
    PhysicalNonSenseRxPriorTx,

    /// A signal time of flight above one second is physically impossible
    /// for an Earth orbiting transmitter: bad measurement upstream.
    #[error("physical non sense: t_rx is too late")]
    PhysicalNonSenseRxTooLate,
}
