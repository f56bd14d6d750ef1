// SIMD kernels for superposition and normalization
// AVX2/FMA on x86_64 with a pipelined scalar fallback everywhere else

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// Below this the setup cost of the wide path is not worth it
#[cfg(target_arch = "x86_64")]
const MIN_DIM_SIZE_AVX: usize = 32;

/// Dot product of two equally sized slices
///
/// Returns 0.0 when the lengths differ.
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
            && a.len() >= MIN_DIM_SIZE_AVX
        {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

/// AVX2 dot product, 16 floats per iteration in two registers
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    let dim = a.len();
    let mut i = 0;

    let mut sum1 = _mm256_setzero_ps();
    let mut sum2 = _mm256_setzero_ps();

    while i + 15 < dim {
        let vx1 = _mm256_loadu_ps(a.as_ptr().add(i));
        let vy1 = _mm256_loadu_ps(b.as_ptr().add(i));
        let vx2 = _mm256_loadu_ps(a.as_ptr().add(i + 8));
        let vy2 = _mm256_loadu_ps(b.as_ptr().add(i + 8));

        sum1 = _mm256_fmadd_ps(vx1, vy1, sum1);
        sum2 = _mm256_fmadd_ps(vx2, vy2, sum2);

        i += 16;
    }

    let combined = _mm256_add_ps(sum1, sum2);
    let sum_high = _mm256_extractf128_ps(combined, 1);
    let sum_low = _mm256_castps256_ps128(combined);
    let mut sum_128 = _mm_add_ps(sum_high, sum_low);
    sum_128 = _mm_hadd_ps(sum_128, sum_128);
    sum_128 = _mm_hadd_ps(sum_128, sum_128);

    let mut dot = _mm_cvtss_f32(sum_128);
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }

    dot
}

#[inline]
fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    let mut dot0 = 0.0f32;
    let mut dot1 = 0.0f32;

    let chunks = a.chunks_exact(4);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(4);

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        dot0 += a_chunk[0] * b_chunk[0] + a_chunk[1] * b_chunk[1];
        dot1 += a_chunk[2] * b_chunk[2] + a_chunk[3] * b_chunk[3];
    }

    for i in (a.len() - remainder.len())..a.len() {
        dot0 += a[i] * b[i];
    }

    dot0 + dot1
}

/// In-place `y += alpha * x`
///
/// Callers guarantee `y.len() == x.len()`; extra elements of the longer
/// slice are left untouched.
#[inline]
pub fn axpy_simd(y: &mut [f32], x: &[f32], alpha: f32) {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
            && y.len() >= MIN_DIM_SIZE_AVX
            && y.len() == x.len()
        {
            unsafe { axpy_avx2(y, x, alpha) };
            return;
        }
    }

    axpy_scalar(y, x, alpha);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
unsafe fn axpy_avx2(y: &mut [f32], x: &[f32], alpha: f32) {
    let dim = y.len();
    let mut i = 0;
    let va = _mm256_set1_ps(alpha);

    while i + 7 < dim {
        let vx = _mm256_loadu_ps(x.as_ptr().add(i));
        let vy = _mm256_loadu_ps(y.as_ptr().add(i));
        _mm256_storeu_ps(y.as_mut_ptr().add(i), _mm256_fmadd_ps(va, vx, vy));
        i += 8;
    }

    while i < dim {
        y[i] += alpha * x[i];
        i += 1;
    }
}

#[inline]
fn axpy_scalar(y: &mut [f32], x: &[f32], alpha: f32) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi += alpha * xi;
    }
}

/// In-place `v *= alpha`
#[inline]
pub fn scale_simd(v: &mut [f32], alpha: f32) {
    for x in v.iter_mut() {
        *x *= alpha;
    }
}

/// Squared euclidean length
#[inline]
pub fn norm_squared_simd(v: &[f32]) -> f32 {
    dot_product_simd(v, v)
}

/// Euclidean length
#[inline]
pub fn norm_simd(v: &[f32]) -> f32 {
    norm_squared_simd(v).sqrt()
}
