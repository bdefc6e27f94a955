//! ARM DSP instruction wrappers with pure-Rust fallbacks.
//!
//! On Cortex-M targets with the DSP extension (M4/M7/M33) these compile to
//! single-cycle instructions. On other targets (host tests, Cortex-M0+)
//! equivalent pure-Rust implementations are used.

/// Signed saturate with arithmetic right shift.
///
/// Computes `saturate(val >> RSHIFT, -(2^(BITS-1))..2^(BITS-1)-1)`.
///
/// Maps to ARM `SSAT`. `BITS` and `RSHIFT` must be compile-time constants
/// because the instruction takes immediate operands.
#[inline(always)]
pub fn signed_saturate_rshift<const BITS: u32, const RSHIFT: u32>(val: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #{bits}, {val}, asr #{rshift}",
                out = out(reg) out,
                val = in(reg) val,
                bits = const BITS,
                rshift = const RSHIFT,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let shifted = val >> RSHIFT;
        let max = (1i32 << (BITS - 1)) - 1;
        let min = -(1i32 << (BITS - 1));
        shifted.clamp(min, max)
    }
}

/// Saturate an `i32` to `i16` range (`-32768..=32767`).
///
/// Maps to ARM `SSAT #16`.
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #16, {val}",
                out = out(reg) out,
                val = in(reg) val,
            );
        }
        out as i16
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        val.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}

/// Pack bottom 16 bits of `a` into the top half, bottom 16 bits of `b` into
/// the bottom half.
///
/// Computes `(a[15:0] << 16) | b[15:0]`. Maps to ARM `PKHBT`.
#[inline(always)]
pub fn pack_16b_16b(a: i32, b: i32) -> u32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: u32;
        unsafe {
            core::arch::asm!(
                "pkhbt {out}, {b}, {a}, lsl #16",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        ((a as u32) << 16) | (b as u32 & 0x0000FFFF)
    }
}
