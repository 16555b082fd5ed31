//! C ABI for the zline codec.
//!
//! This crate exposes the codec to a vectorized columnar host as plain
//! `extern "C"` scalar entry points: one tuple per call, width-dispatched,
//! status codes instead of panics. The host keeps ownership of every buffer;
//! nothing here allocates or retains pointers past the call.
//!
//! # Contract
//!
//! * `src`/`dst` point at host-owned storage of the exact widths implied by
//!   the (lane width, lane count) pair; see
//!   [`Descriptor::bind_encode`](zline_core::Descriptor::bind_encode) for
//!   the code-width table.
//! * Signed and floating-point columns are passed bit-cast at their storage
//!   width; the codec moves bit patterns verbatim.
//! * All validation happens before either pointer is dereferenced.

use core::ffi::c_void;

use zline_core::{hilbert, morton, CurveKind, Descriptor, ElementRepr, MAX_LANES};

/// Call completed.
pub const ZLINE_OK: i32 = 0;
/// The (lane width, lane count) combination is outside the supported table.
pub const ZLINE_EDOMAIN: i32 = -1;
/// Unknown encoding-kind tag.
pub const ZLINE_EKIND: i32 = -2;
/// Null pointer argument.
pub const ZLINE_ENULL: i32 = -3;

/// Wire tag for the Hilbert curve.
pub const ZLINE_KIND_HILBERT: u8 = 0;
/// Wire tag for the Morton curve.
pub const ZLINE_KIND_MORTON: u8 = 1;

fn kind_from_tag(tag: u8) -> Option<CurveKind> {
    match tag {
        ZLINE_KIND_HILBERT => Some(CurveKind::Hilbert),
        ZLINE_KIND_MORTON => Some(CurveKind::Morton),
        _ => None,
    }
}

/// Load `tuple.len()` lanes of `width` bits from `src`.
///
/// # Safety
///
/// `src` must point at `tuple.len()` readable elements of the given width.
unsafe fn load_lanes(src: *const c_void, width: u32, tuple: &mut [u128]) {
    match width {
        8 => {
            let p = src as *const u8;
            for (i, lane) in tuple.iter_mut().enumerate() {
                *lane = p.add(i).read_unaligned() as u128;
            }
        }
        16 => {
            let p = src as *const u16;
            for (i, lane) in tuple.iter_mut().enumerate() {
                *lane = p.add(i).read_unaligned() as u128;
            }
        }
        32 => {
            let p = src as *const u32;
            for (i, lane) in tuple.iter_mut().enumerate() {
                *lane = p.add(i).read_unaligned() as u128;
            }
        }
        _ => {
            let p = src as *const u64;
            for (i, lane) in tuple.iter_mut().enumerate() {
                *lane = p.add(i).read_unaligned() as u128;
            }
        }
    }
}

/// Store `tuple.len()` lanes of `width` bits to `dst`.
///
/// # Safety
///
/// `dst` must point at `tuple.len()` writable elements of the given width.
unsafe fn store_lanes(dst: *mut c_void, width: u32, tuple: &[u128]) {
    match width {
        8 => {
            let p = dst as *mut u8;
            for (i, &lane) in tuple.iter().enumerate() {
                p.add(i).write_unaligned(lane as u8);
            }
        }
        16 => {
            let p = dst as *mut u16;
            for (i, &lane) in tuple.iter().enumerate() {
                p.add(i).write_unaligned(lane as u16);
            }
        }
        32 => {
            let p = dst as *mut u32;
            for (i, &lane) in tuple.iter().enumerate() {
                p.add(i).write_unaligned(lane as u32);
            }
        }
        _ => {
            let p = dst as *mut u64;
            for (i, &lane) in tuple.iter().enumerate() {
                p.add(i).write_unaligned(lane as u64);
            }
        }
    }
}

/// Store one code word of `width` bits to `dst`.
///
/// # Safety
///
/// `dst` must point at one writable word of the given width.
unsafe fn store_code(dst: *mut c_void, width: u32, code: u128) {
    match width {
        8 => (dst as *mut u8).write_unaligned(code as u8),
        16 => (dst as *mut u16).write_unaligned(code as u16),
        32 => (dst as *mut u32).write_unaligned(code as u32),
        64 => (dst as *mut u64).write_unaligned(code as u64),
        _ => (dst as *mut u128).write_unaligned(code),
    }
}

/// Load one code word of `width` bits from `src`.
///
/// # Safety
///
/// `src` must point at one readable word of the given width.
unsafe fn load_code(src: *const c_void, width: u32) -> u128 {
    match width {
        8 => (src as *const u8).read_unaligned() as u128,
        16 => (src as *const u16).read_unaligned() as u128,
        32 => (src as *const u32).read_unaligned() as u128,
        64 => (src as *const u64).read_unaligned() as u128,
        _ => (src as *const u128).read_unaligned(),
    }
}

/// Encode one tuple into one code word.
///
/// `src` holds `lane_count` lanes of `lane_width` bits; `dst` receives one
/// code word of the table-derived width. Returns [`ZLINE_OK`] or a negative
/// status; `dst` is untouched on error.
///
/// # Safety
///
/// Called from C. `src` and `dst` must satisfy the crate-level contract for
/// the given widths; null pointers are rejected, dangling ones cannot be.
#[no_mangle]
pub unsafe extern "C" fn zline_encode(
    kind: u8,
    lane_width: u8,
    lane_count: u8,
    src: *const c_void,
    dst: *mut c_void,
) -> i32 {
    let kind = match kind_from_tag(kind) {
        Some(kind) => kind,
        None => return ZLINE_EKIND,
    };
    if src.is_null() || dst.is_null() {
        return ZLINE_ENULL;
    }
    let desc = match Descriptor::bind_encode(
        kind,
        ElementRepr::Uint,
        lane_width as u32,
        lane_count as usize,
    ) {
        Ok(desc) => desc,
        Err(_) => return ZLINE_EDOMAIN,
    };

    let n = desc.lane_count();
    let width = desc.lane_width();
    let mut tuple = [0u128; MAX_LANES];
    load_lanes(src, width, &mut tuple[..n]);

    let code = match desc.kind() {
        CurveKind::Hilbert => hilbert::encode(&tuple[..n], width),
        CurveKind::Morton => morton::encode(&tuple[..n], width),
    };
    store_code(dst, desc.code_width(), code);
    ZLINE_OK
}

/// Decode one code word into one tuple.
///
/// `src` holds one code word of `code_width` bits; `dst` receives
/// `lane_count` lanes of the table-derived lane width. Returns [`ZLINE_OK`]
/// or a negative status; `dst` is untouched on error.
///
/// # Safety
///
/// Called from C. `src` and `dst` must satisfy the crate-level contract for
/// the given widths; null pointers are rejected, dangling ones cannot be.
#[no_mangle]
pub unsafe extern "C" fn zline_decode(
    kind: u8,
    code_width: u8,
    lane_count: u8,
    src: *const c_void,
    dst: *mut c_void,
) -> i32 {
    let kind = match kind_from_tag(kind) {
        Some(kind) => kind,
        None => return ZLINE_EKIND,
    };
    if src.is_null() || dst.is_null() {
        return ZLINE_ENULL;
    }
    let desc = match Descriptor::bind_decode(
        kind,
        code_width as u32,
        lane_count as usize,
        false,
        true,
    ) {
        Ok(desc) => desc,
        Err(_) => return ZLINE_EDOMAIN,
    };

    let n = desc.lane_count();
    let width = desc.lane_width();
    let code = load_code(src, desc.code_width());

    let mut tuple = [0u128; MAX_LANES];
    match desc.kind() {
        CurveKind::Hilbert => hilbert::decode(code, width, &mut tuple[..n]),
        CurveKind::Morton => morton::decode(code, width, &mut tuple[..n]),
    }
    store_lanes(dst, width, &tuple[..n]);
    ZLINE_OK
}
