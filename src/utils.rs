//! Number-theoretic helpers shared by the group and generator modules

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::thread_rng;

/// Primes used for trial division before running Miller-Rabin.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Modular exponentiation: base^exp mod modulus
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Number of Miller-Rabin rounds giving an error probability of at most 2^-certainty.
pub fn rounds_for_certainty(certainty: u32) -> usize {
    certainty.div_ceil(2).max(1) as usize
}

/// Probabilistic primality test: trial division by small primes, then
/// `k` rounds of Miller-Rabin with random witnesses.
pub fn is_probable_prime(n: &BigUint, k: usize) -> bool {
    if n <= &BigUint::one() {
        return false;
    }

    for &small in SMALL_PRIMES.iter() {
        if *n == BigUint::from(small) {
            return true;
        }
        if (n % small).is_zero() {
            return false;
        }
    }

    let mut rng = thread_rng();
    let two = BigUint::from(2u32);
    let n_minus_1 = n - BigUint::one();
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..k {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = mod_exp(&a, &d, n);

        if x.is_one() || x == n_minus_1 {
            continue;
        }

        for _ in 1..s {
            x = mod_exp(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2 from n
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();

    while !d.is_zero() && d.is_even() {
        d >>= 1u32;
        s += 1;
    }

    (s, d)
}

/// Jacobi symbol (a / n) for odd n > 0. Returns 0 when gcd(a, n) > 1.
pub(crate) fn jacobi_symbol(a: &BigUint, n: &BigUint) -> i8 {
    debug_assert!(n.is_odd(), "jacobi symbol needs an odd modulus");

    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i8;

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1u32;
            let r = low_bits(&n, 7);
            if r == 3 || r == 5 {
                result = -result;
            }
        }

        std::mem::swap(&mut a, &mut n);

        if low_bits(&a, 3) == 3 && low_bits(&n, 3) == 3 {
            result = -result;
        }
        a %= &n;
    }

    if n.is_one() {
        result
    } else {
        0
    }
}

/// Subgroup membership for a safe prime p: 0 < value < p and value is a quadratic residue.
///
/// Always false for an even modulus or one below 3.
pub fn is_group_member(value: &BigUint, p: &BigUint) -> bool {
    if !is_odd_modulus(p) {
        return false;
    }
    !value.is_zero() && value < p && jacobi_symbol(value, p) == 1
}

/// Odd and at least 3, the moduli the Jacobi symbol is defined for
pub(crate) fn is_odd_modulus(p: &BigUint) -> bool {
    p.is_odd() && p > &BigUint::one()
}

/// Minimal big-endian encoding of a non-negative integer; zero encodes as a single 0x00 byte.
pub fn integer_to_bytes(value: &BigUint) -> Vec<u8> {
    value.to_bytes_be()
}

fn low_bits(n: &BigUint, mask: u32) -> u32 {
    n.iter_u32_digits().next().unwrap_or(0) & mask
}
