//! Runtime CPU capability detection.
//!
//! The host is probed once per process and the result cached. On x86_64 the
//! CPUID feature bits are read directly; on macOS the kernel's
//! `hw.optional.*` sysctl names are queried instead. Every probe that fails or
//! has no mechanism on the current target reports `false`, so a failed
//! detection only ever costs speed.

use crate::core::tier::Tier;
use serde::Serialize;
use std::sync::OnceLock;

/// Which vector tiers the host can execute.
///
/// `wide_extended` is only ever set together with `wide`: the extended
/// capability is probed after, and only when, the baseline wide capability is
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct CapabilityFlags {
    narrow: bool,
    wide: bool,
    wide_extended: bool,
}

static DETECTED: OnceLock<CapabilityFlags> = OnceLock::new();

impl CapabilityFlags {
    /// No vector support at all.
    pub const NONE: CapabilityFlags = CapabilityFlags {
        narrow: false,
        wide: false,
        wide_extended: false,
    };

    /// Builds a flag set, clearing `wide_extended` unless `wide` is also set.
    pub const fn new(narrow: bool, wide: bool, wide_extended: bool) -> Self {
        CapabilityFlags {
            narrow,
            wide,
            wide_extended: wide && wide_extended,
        }
    }

    /// Flags for the running CPU (probed on first call, cached afterwards).
    pub fn detect() -> Self {
        *DETECTED.get_or_init(|| {
            let flags = probe();
            tracing::debug!(
                narrow = flags.narrow,
                wide = flags.wide,
                wide_extended = flags.wide_extended,
                instruction_set = flags.instruction_set(),
                "detected cpu capabilities"
            );
            flags
        })
    }

    /// 16-byte vectors (SSE2 / NEON).
    pub fn narrow(&self) -> bool {
        self.narrow
    }

    /// 256-bit loads and stores (AVX).
    pub fn wide(&self) -> bool {
        self.wide
    }

    /// 256-bit integer arithmetic (AVX2).
    pub fn wide_extended(&self) -> bool {
        self.wide_extended
    }

    pub fn supports(&self, tier: Tier) -> bool {
        match tier {
            Tier::Scalar => true,
            Tier::Narrow => self.narrow,
            Tier::Wide => self.wide,
            Tier::WideExtended => self.wide_extended,
        }
    }

    /// Fastest supported tier, in the order WideExtended > Wide > Narrow > Scalar.
    pub fn best_tier(&self) -> Tier {
        if self.wide_extended {
            Tier::WideExtended
        } else if self.wide {
            Tier::Wide
        } else if self.narrow {
            Tier::Narrow
        } else {
            Tier::Scalar
        }
    }

    pub fn instruction_set(&self) -> &'static str {
        self.best_tier().label()
    }

    /// Tiers this flag set can run, slowest first.
    pub fn supported_tiers(&self) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|tier| self.supports(*tier))
            .collect()
    }

    /// Capabilities present in both sets.
    pub fn intersect(self, other: CapabilityFlags) -> Self {
        CapabilityFlags::new(
            self.narrow && other.narrow,
            self.wide && other.wide,
            self.wide_extended && other.wide_extended,
        )
    }

    /// Drops every capability above `max`.
    pub fn capped(self, max: Tier) -> Self {
        CapabilityFlags::new(
            self.narrow && max >= Tier::Narrow,
            self.wide && max >= Tier::Wide,
            self.wide_extended && max >= Tier::WideExtended,
        )
    }
}

#[cfg(all(target_arch = "x86_64", not(target_os = "macos")))]
fn probe() -> CapabilityFlags {
    cpuid::probe()
}

#[cfg(target_os = "macos")]
fn probe() -> CapabilityFlags {
    sysctl::probe()
}

#[cfg(all(target_arch = "aarch64", not(target_os = "macos")))]
fn probe() -> CapabilityFlags {
    CapabilityFlags::new(std::arch::is_aarch64_feature_detected!("neon"), false, false)
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> CapabilityFlags {
    CapabilityFlags::NONE
}

#[cfg(all(target_arch = "x86_64", not(target_os = "macos")))]
mod cpuid {
    use super::CapabilityFlags;
    use std::arch::x86_64::{__cpuid, __cpuid_count, __get_cpuid_max, _xgetbv};

    const LEAF1_EDX_SSE2: u32 = 1 << 26;
    const LEAF1_ECX_OSXSAVE: u32 = 1 << 27;
    const LEAF1_ECX_AVX: u32 = 1 << 28;
    const LEAF7_EBX_AVX2: u32 = 1 << 5;
    /// XCR0 bits 1 (SSE state) and 2 (AVX state)
    const XCR0_YMM_STATE: u64 = 0b110;

    #[allow(unused_unsafe)]
    pub(super) fn probe() -> CapabilityFlags {
        // SAFETY: CPUID is available on every x86_64 processor
        let (max_leaf, _) = unsafe { __get_cpuid_max(0) };
        if max_leaf < 1 {
            return CapabilityFlags::NONE;
        }

        let leaf1 = unsafe { __cpuid(1) };
        let narrow = leaf1.edx & LEAF1_EDX_SSE2 != 0;
        let wide = leaf1.ecx & LEAF1_ECX_AVX != 0 && os_saves_ymm(leaf1.ecx);

        let wide_extended = wide && max_leaf >= 7 && {
            let leaf7 = unsafe { __cpuid_count(7, 0) };
            leaf7.ebx & LEAF7_EBX_AVX2 != 0
        };

        CapabilityFlags::new(narrow, wide, wide_extended)
    }

    /// AVX registers are only usable if the OS context-switches YMM state.
    fn os_saves_ymm(leaf1_ecx: u32) -> bool {
        if leaf1_ecx & LEAF1_ECX_OSXSAVE == 0 {
            return false;
        }
        // SAFETY: OSXSAVE set means the OS enabled XGETBV
        let xcr0 = unsafe { read_xcr0() };
        xcr0 & XCR0_YMM_STATE == XCR0_YMM_STATE
    }

    #[target_feature(enable = "xsave")]
    #[allow(unused_unsafe)]
    unsafe fn read_xcr0() -> u64 {
        unsafe { _xgetbv(0) }
    }
}

#[cfg(target_os = "macos")]
mod sysctl {
    use super::CapabilityFlags;
    use std::ffi::CStr;

    /// Reads an integer `hw.optional.*` entry; missing names read as false.
    fn lookup(name: &CStr) -> bool {
        let mut value: libc::c_int = 0;
        let mut len = std::mem::size_of::<libc::c_int>();

        // SAFETY: `value` and `len` describe a valid c_int-sized buffer and
        // `name` is NUL-terminated.
        let rc = unsafe {
            libc::sysctlbyname(
                name.as_ptr(),
                (&mut value as *mut libc::c_int).cast(),
                &mut len,
                std::ptr::null_mut(),
                0,
            )
        };

        rc == 0 && value != 0
    }

    #[cfg(target_arch = "x86_64")]
    pub(super) fn probe() -> CapabilityFlags {
        let narrow = lookup(c"hw.optional.sse2");
        let wide = lookup(c"hw.optional.avx1_0");
        let wide_extended = wide && lookup(c"hw.optional.avx2_0");
        CapabilityFlags::new(narrow, wide, wide_extended)
    }

    #[cfg(target_arch = "aarch64")]
    pub(super) fn probe() -> CapabilityFlags {
        CapabilityFlags::new(lookup(c"hw.optional.neon"), false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_cached() {
        assert_eq!(CapabilityFlags::detect(), CapabilityFlags::detect());
    }

    #[test]
    fn test_detected_flags_are_monotonic() {
        let flags = CapabilityFlags::detect();
        if flags.wide_extended() {
            assert!(flags.wide(), "AVX2 reported without AVX");
        }
    }

    #[test]
    fn test_new_normalizes_extended_without_wide() {
        let flags = CapabilityFlags::new(true, false, true);
        assert!(!flags.wide_extended());
        assert_eq!(flags.best_tier(), Tier::Narrow);
    }

    #[test]
    fn test_best_tier_priority() {
        assert_eq!(CapabilityFlags::NONE.best_tier(), Tier::Scalar);
        assert_eq!(CapabilityFlags::new(true, false, false).best_tier(), Tier::Narrow);
        assert_eq!(CapabilityFlags::new(true, true, false).best_tier(), Tier::Wide);
        assert_eq!(
            CapabilityFlags::new(true, true, true).best_tier(),
            Tier::WideExtended
        );
        // Wide without narrow still outranks narrow
        assert_eq!(CapabilityFlags::new(false, true, false).best_tier(), Tier::Wide);
    }

    #[test]
    fn test_instruction_set_labels() {
        assert_eq!(CapabilityFlags::NONE.instruction_set(), "DEFAULT");
        assert_eq!(CapabilityFlags::new(true, true, false).instruction_set(), "AVX");
        assert_eq!(CapabilityFlags::new(true, true, true).instruction_set(), "AVX2");
    }

    #[test]
    fn test_capped() {
        let all = CapabilityFlags::new(true, true, true);
        assert_eq!(all.capped(Tier::Wide).best_tier(), Tier::Wide);
        assert_eq!(all.capped(Tier::Narrow).best_tier(), Tier::Narrow);
        assert_eq!(all.capped(Tier::Scalar), CapabilityFlags::NONE);
        assert_eq!(all.capped(Tier::WideExtended), all);
    }

    #[test]
    fn test_intersect_never_adds() {
        let host = CapabilityFlags::new(true, false, false);
        let claimed = CapabilityFlags::new(true, true, true);
        assert_eq!(claimed.intersect(host), host);
    }

    #[test]
    fn test_supported_tiers_always_include_scalar() {
        assert_eq!(CapabilityFlags::NONE.supported_tiers(), vec![Tier::Scalar]);
        assert_eq!(
            CapabilityFlags::new(true, true, false).supported_tiers(),
            vec![Tier::Scalar, Tier::Narrow, Tier::Wide]
        );
    }
}
