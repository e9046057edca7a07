use async_trait::async_trait;
use kanto_battle::Button;

use crate::error::TransportError;

/// Byte-level access to emulated memory plus joypad input.
///
/// Multi-byte reads are little-endian. Implementations only need
/// [`read_bytes`](MemoryBus::read_bytes) and [`press`](MemoryBus::press);
/// the typed readers are built on top.
#[async_trait]
pub trait MemoryBus: Send + Sync {
    /// Read `length` bytes starting at `address`
    async fn read_bytes(&self, address: u32, length: usize) -> Result<Vec<u8>, TransportError>;

    /// Tap a button once
    async fn press(&self, button: Button) -> Result<(), TransportError>;

    async fn read_u8(&self, address: u32) -> Result<u8, TransportError> {
        let bytes = read_exact::<1, _>(self, address).await?;
        Ok(bytes[0])
    }

    async fn read_u16(&self, address: u32) -> Result<u16, TransportError> {
        let bytes = read_exact::<2, _>(self, address).await?;
        Ok(u16::from_le_bytes(bytes))
    }

    async fn read_u32(&self, address: u32) -> Result<u32, TransportError> {
        let bytes = read_exact::<4, _>(self, address).await?;
        Ok(u32::from_le_bytes(bytes))
    }
}

async fn read_exact<const N: usize, B: MemoryBus + ?Sized>(
    bus: &B,
    address: u32,
) -> Result<[u8; N], TransportError> {
    let bytes = bus.read_bytes(address, N).await?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| TransportError::ShortRead {
            address,
            expected: N,
            actual,
        })
}
