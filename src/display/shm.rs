// src/display/shm.rs

//! Shared-memory pixel buffers (memfd + mmap + wl_shm_pool).

use crate::display::session::SessionState;
use crate::surface::{Extent, PixelSurface};
use anyhow::{bail, Context, Result};
use log::debug;
use std::ffi::{c_void, CString};
use std::os::fd::{AsFd, AsRawFd, FromRawFd, OwnedFd};
use std::ptr::NonNull;
use wayland_client::{
    protocol::{wl_buffer, wl_shm, wl_shm_pool},
    QueueHandle,
};

const SHM_FORMAT: wl_shm::Format = wl_shm::Format::Xrgb8888;
const BYTES_PER_PIXEL: u32 = 4;

/// A single XRGB8888 buffer shared with the compositor.
pub struct ShmBuffer {
    buffer: wl_buffer::WlBuffer,
    pool: wl_shm_pool::WlShmPool,
    map: ShmMap,
    extent: Extent,
}

impl ShmBuffer {
    pub fn allocate(
        shm: &wl_shm::WlShm,
        qh: &QueueHandle<SessionState>,
        extent: Extent,
    ) -> Result<Self> {
        if extent.is_empty() {
            bail!("Refusing to allocate an empty {} buffer", extent);
        }
        let (stride, size) = buffer_layout(extent)?;

        let fd = create_memfd(size).context("Failed to create memfd")?;
        let map = ShmMap::new(&fd, size).context("Failed to mmap shm buffer")?;

        let pool = shm.create_pool(fd.as_fd(), size, qh, ());
        let buffer = pool.create_buffer(
            0,
            extent.width as i32,
            extent.height as i32,
            stride,
            SHM_FORMAT,
            qh,
            (),
        );
        debug!("Allocated {} shm buffer ({} bytes)", extent, size);

        Ok(Self {
            buffer,
            pool,
            map,
            extent,
        })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn wl_buffer(&self) -> &wl_buffer::WlBuffer {
        &self.buffer
    }

    /// Borrows the mapping as a pixel surface.
    pub fn surface(&mut self) -> Result<PixelSurface<'_>> {
        let pixels = self.map.as_pixels_mut(self.extent.area());
        Ok(PixelSurface::new(pixels, self.extent)?)
    }
}

impl Drop for ShmBuffer {
    fn drop(&mut self) {
        debug!("Releasing {} shm buffer", self.extent);
        self.buffer.destroy();
        self.pool.destroy();
    }
}

/// Stride and total size in bytes, both as the protocol's `i32`.
fn buffer_layout(extent: Extent) -> Result<(i32, i32)> {
    let stride = extent
        .width
        .checked_mul(BYTES_PER_PIXEL)
        .and_then(|s| i32::try_from(s).ok());
    let size = stride.and_then(|s| s.checked_mul(i32::try_from(extent.height).ok()?));
    match (stride, size) {
        (Some(stride), Some(size)) => Ok((stride, size)),
        _ => bail!("Buffer for {} exceeds the shm size limit", extent),
    }
}

fn create_memfd(size: i32) -> Result<OwnedFd> {
    let name = CString::new("rectpaint-buffer")?;
    let raw = unsafe { libc::memfd_create(name.as_ptr(), libc::MFD_CLOEXEC) };
    if raw < 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    // SAFETY: memfd_create returned a fresh descriptor we now own.
    let fd = unsafe { OwnedFd::from_raw_fd(raw) };
    if unsafe { libc::ftruncate(fd.as_raw_fd(), size as libc::off_t) } != 0 {
        return Err(std::io::Error::last_os_error()).context("ftruncate on memfd failed");
    }
    Ok(fd)
}

struct ShmMap {
    ptr: NonNull<u8>,
    len: usize,
}

impl ShmMap {
    fn new(fd: &OwnedFd, size: i32) -> Result<Self> {
        let len = size as usize;
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd.as_raw_fd(),
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(std::io::Error::last_os_error().into());
        }
        let ptr = NonNull::new(ptr as *mut u8)
            .ok_or_else(|| anyhow::anyhow!("mmap returned a null mapping"))?;
        Ok(Self { ptr, len })
    }

    fn as_pixels_mut(&mut self, count: usize) -> &mut [u32] {
        let count = count.min(self.len / BYTES_PER_PIXEL as usize);
        // SAFETY: the mapping is page aligned, at least `count * 4` bytes long
        // and lives as long as `self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr() as *mut u32, count) }
    }
}

impl Drop for ShmMap {
    fn drop(&mut self) {
        unsafe { libc::munmap(self.ptr.as_ptr() as *mut c_void, self.len) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_compute_stride_and_size() {
        assert_eq!(buffer_layout(Extent::new(300, 600)).unwrap(), (1200, 720_000));
    }

    #[test]
    fn it_should_reject_buffers_past_the_protocol_limit() {
        assert!(buffer_layout(Extent::new(u32::MAX, 1)).is_err());
        assert!(buffer_layout(Extent::new(40_000, 40_000)).is_err());
    }

    #[test]
    fn it_should_map_a_zeroed_memfd() -> Result<()> {
        let fd = create_memfd(64)?;
        let mut map = ShmMap::new(&fd, 64)?;
        let pixels = map.as_pixels_mut(16);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|&p| p == 0));
        pixels[15] = 0x00ff_00ff;
        assert_eq!(map.as_pixels_mut(16)[15], 0x00ff_00ff);
        Ok(())
    }
}
